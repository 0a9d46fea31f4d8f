//! Static decoder configuration
//!
//! Everything here is fixed at startup: pulse timing windows, the input pin
//! the embedding wires the receiver to, the foreground tick cadence, and the
//! descriptive tags stamped into every output record. Nothing is re-read at
//! runtime and nothing allocates.

use crate::constants::{
    EVAL_TICK_INTERVAL_MS, FRAME_GAP_US, MARKER_PULSE_US, ONE_GAP_US, PULSE_TOLERANCE_US,
    ZERO_GAP_US,
};
use crate::edge::Microseconds;
use crate::errors::{DecodeError, DecodeResult};
use crate::record::RecordTags;

/// Pulse-width windows used to classify edge durations
///
/// A duration `d` matches a window when `|d - nominal| <= tolerance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PulseTiming {
    /// Nominal high marker pulse width (µs)
    pub marker_us: Microseconds,
    /// Nominal low period for a 0 bit (µs)
    pub zero_gap_us: Microseconds,
    /// Nominal low period for a 1 bit (µs)
    pub one_gap_us: Microseconds,
    /// Nominal low period separating frames (µs)
    pub frame_gap_us: Microseconds,
    /// Accepted deviation around each nominal (µs)
    pub tolerance_us: Microseconds,
}

impl PulseTiming {
    /// Canonical Nexus transmitter timing
    pub const fn nexus() -> Self {
        Self {
            marker_us: MARKER_PULSE_US,
            zero_gap_us: ZERO_GAP_US,
            one_gap_us: ONE_GAP_US,
            frame_gap_us: FRAME_GAP_US,
            tolerance_us: PULSE_TOLERANCE_US,
        }
    }

    /// Does `d` match the high marker pulse window?
    pub const fn is_marker(&self, d: Microseconds) -> bool {
        d.abs_diff(self.marker_us) <= self.tolerance_us
    }

    /// Does `d` match the 0-bit low period window?
    pub const fn is_zero_gap(&self, d: Microseconds) -> bool {
        d.abs_diff(self.zero_gap_us) <= self.tolerance_us
    }

    /// Does `d` match the 1-bit low period window?
    pub const fn is_one_gap(&self, d: Microseconds) -> bool {
        d.abs_diff(self.one_gap_us) <= self.tolerance_us
    }

    /// Does `d` match the frame separator window?
    pub const fn is_frame_gap(&self, d: Microseconds) -> bool {
        d.abs_diff(self.frame_gap_us) <= self.tolerance_us
    }

    /// Reject timings whose windows overlap or invert
    ///
    /// Overlapping windows would make classification ambiguous; the decoder
    /// refuses to start rather than misread bits.
    pub fn validate(&self) -> DecodeResult<()> {
        let ordered = self.marker_us < self.zero_gap_us
            && self.zero_gap_us < self.one_gap_us
            && self.one_gap_us < self.frame_gap_us;
        if !ordered {
            return Err(DecodeError::ConfigInvalid {
                reason: "pulse widths must be strictly increasing",
            });
        }

        // a + tol < b - tol, written without subtraction so oversized
        // tolerances cannot underflow
        let spread = 2 * self.tolerance_us;
        let disjoint = self.marker_us + spread < self.zero_gap_us
            && self.zero_gap_us + spread < self.one_gap_us
            && self.one_gap_us + spread < self.frame_gap_us;
        if !disjoint {
            return Err(DecodeError::ConfigInvalid {
                reason: "tolerance windows overlap adjacent pulse widths",
            });
        }

        Ok(())
    }
}

impl Default for PulseTiming {
    fn default() -> Self {
        Self::nexus()
    }
}

/// Complete decoder configuration
///
/// Queue capacity is the one knob not found here: it is the const generic
/// parameter of [`crate::queue::FrameQueue`], fixed where the shared
/// `static` is declared (see [`crate::constants::DEFAULT_QUEUE_CAPACITY`]).
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecoderConfig {
    /// Input pin the receiver's data line is wired to
    ///
    /// Consumed by the embedding when installing the pin-change handler;
    /// the decoder itself never touches hardware.
    pub pin: u8,
    /// Pulse classification windows
    pub timing: PulseTiming,
    /// Foreground evaluation tick interval (ms)
    pub tick_interval_ms: u32,
    /// Static tags stamped into every output record
    pub tags: RecordTags,
}

impl DecoderConfig {
    /// Validate the whole configuration
    pub fn validate(&self) -> DecodeResult<()> {
        self.timing.validate()?;
        if self.tick_interval_ms == 0 {
            return Err(DecodeError::ConfigInvalid {
                reason: "tick interval must be nonzero",
            });
        }
        Ok(())
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            pin: 2,
            timing: PulseTiming::nexus(),
            tick_interval_ms: EVAL_TICK_INTERVAL_MS,
            tags: RecordTags::default(),
        }
    }
}
