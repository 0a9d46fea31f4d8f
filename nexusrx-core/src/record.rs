//! Output record formatting and emission
//!
//! Each accepted frame becomes exactly one line of text in a tag-based
//! format the downstream forwarder understands:
//!
//! ```text
//! weather,qth=JO65cn,sensor=nexus,number=156 temperature=215,battery=1,humidity=46
//! ```
//!
//! The tags are static strings configured once; the values come straight
//! from the decoded [`SensorReading`]. Temperature is the signed
//! decicelsius integer exactly as extracted; downstream consumers divide
//! by ten for display. Lines are built in a fixed `heapless` buffer so the
//! foreground tick never allocates, and handed to a [`RecordSink`]; serial
//! transport, broker topics, and timestamps are the forwarder's problem,
//! not ours.

use core::fmt::Write;

use crate::constants::RECORD_CAPACITY;
use crate::errors::{DecodeError, DecodeResult};
use crate::frame::SensorReading;

/// A formatted output line
pub type Record = heapless::String<RECORD_CAPACITY>;

/// Static descriptive tags stamped into every record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RecordTags {
    /// Target measurement/database name (first token of the line)
    pub database: &'static str,
    /// Station locator, e.g. a Maidenhead grid square
    pub locator: &'static str,
    /// Sensor family tag
    pub sensor: &'static str,
}

impl Default for RecordTags {
    fn default() -> Self {
        Self {
            database: "weather",
            locator: "unknown",
            sensor: "nexus",
        }
    }
}

/// Format one reading as an output record
///
/// Fails only if the tags are so long the line no longer fits the fixed
/// buffer; the caller drops the record and keeps running.
pub fn format_record(tags: &RecordTags, reading: &SensorReading) -> DecodeResult<Record> {
    let mut line = Record::new();
    write!(
        line,
        "{},qth={},sensor={},number={} temperature={},battery={},humidity={}",
        tags.database,
        tags.locator,
        tags.sensor,
        reading.id,
        reading.temperature_decicelsius,
        reading.battery_ok as u8,
        reading.humidity_percent,
    )
    .map_err(|_| DecodeError::RecordOverflow {
        capacity: RECORD_CAPACITY,
    })?;
    Ok(line)
}

/// Destination for emitted records
///
/// The decoder's only outward surface. Implementations must not block the
/// foreground tick for longer than the tick interval.
pub trait RecordSink {
    /// Deliver one formatted record line (no trailing newline)
    fn publish(&mut self, line: &str);
}

/// Adapter turning any closure into a sink
pub struct FnSink<F: FnMut(&str)>(pub F);

impl<F: FnMut(&str)> RecordSink for FnSink<F> {
    fn publish(&mut self, line: &str) {
        (self.0)(line)
    }
}

/// Sink that prints each record to stdout, one per line
///
/// Matches the deployment setup where a line-reading forwarder consumes
/// the process's standard output.
#[cfg(feature = "std")]
pub struct StdoutSink;

#[cfg(feature = "std")]
impl RecordSink for StdoutSink {
    fn publish(&mut self, line: &str) {
        println!("{line}");
    }
}
