//! Per-tick frame evaluation and record emission
//!
//! The foreground scheduling loop calls [`FrameEvaluator::tick`] once per
//! interval (nominally 1s). Each tick drains the frame queue completely and
//! applies the two-stage validity filter:
//!
//! 1. **Marker check**: bits 8..11 must be `1111`. The Nexus frame has no
//!    checksum, so this fixed nibble is the only cheap plausibility test.
//! 2. **Duplicate confirmation**: a frame is accepted only when it is
//!    bit-identical to the frame seen immediately before it. Transmitters
//!    repeat each frame ~10 times per burst, so a corrupted frame almost
//!    never appears twice in a row.
//!
//! On acceptance the fields are extracted, formatted, and published; the
//! rest of the drain is discarded, since further duplicates carry no new
//! information.
//!
//! The reference/confirmed state resets unconditionally at the end of every
//! tick: confirmation never spans ticks. A burst that straddles a tick
//! boundary with only one repeat on each side is therefore missed, a
//! long-standing behavior of this decoder that is kept intact rather than
//! silently fixed. [`EvaluatorStats::duplicate_misses`] makes the effect
//! measurable.

use core::sync::atomic::Ordering;

use crate::frame::Frame;
use crate::queue::FrameQueue;
use crate::record::{format_record, RecordSink, RecordTags};

// Macro for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{ let _ = ($($arg)*,); }};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{ let _ = ($($arg)*,); }};
}

/// Evaluator health counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluatorStats {
    /// Readings accepted and emitted
    pub accepted: u32,
    /// Frames rejected by the marker nibble check
    pub marker_rejects: u32,
    /// Ticks that saw at least one marker-valid frame but confirmed none
    pub duplicate_misses: u32,
}

/// Drains the frame queue on a fixed cadence and emits accepted readings
///
/// Owns only per-cycle validation state and the record tags; the queue and
/// sink are borrowed per tick so the same evaluator works against a
/// `static` queue and any output.
#[derive(Debug, Clone)]
pub struct FrameEvaluator {
    tags: RecordTags,
    /// Previous frame this tick, the candidate for duplicate confirmation
    reference: u64,
    /// A reading was already accepted this tick
    confirmed: bool,
    /// Queue drop count at last tick, for overflow reporting
    seen_drops: u32,
    stats: EvaluatorStats,
}

impl FrameEvaluator {
    /// Create an evaluator stamping `tags` into every record
    pub const fn new(tags: RecordTags) -> Self {
        Self {
            tags,
            reference: 0,
            confirmed: false,
            seen_drops: 0,
            stats: EvaluatorStats {
                accepted: 0,
                marker_rejects: 0,
                duplicate_misses: 0,
            },
        }
    }

    /// Evaluate everything currently queued, emitting at most one record
    ///
    /// Processes frames in arrival order. Runs to completion without
    /// blocking; the producer keeps enqueuing concurrently and anything it
    /// adds after the drain ends waits for the next tick.
    pub fn tick<const N: usize, S: RecordSink>(
        &mut self,
        queue: &FrameQueue<N>,
        sink: &mut S,
    ) {
        self.report_overflow(queue);

        let mut saw_candidate = false;
        while let Some(frame) = queue.pop() {
            // Past the accepted reading: flush the rest of the tick
            if self.confirmed {
                continue;
            }

            if !frame.marker_ok() {
                self.stats.marker_rejects += 1;
                self.reference = frame.raw();
                continue;
            }

            saw_candidate = true;
            if frame.raw() == self.reference {
                // Second identical valid frame: accept
                self.confirmed = true;
                self.stats.accepted += 1;
                self.emit(frame, sink);
            } else {
                self.reference = frame.raw();
            }
        }

        if saw_candidate && !self.confirmed {
            self.stats.duplicate_misses += 1;
        }

        // Confirmation only spans frames drained within one tick
        self.reference = 0;
        self.confirmed = false;
    }

    /// Evaluator health counters
    pub fn stats(&self) -> EvaluatorStats {
        self.stats
    }

    fn emit<S: RecordSink>(&mut self, frame: Frame, sink: &mut S) {
        let reading = frame.reading();
        match format_record(&self.tags, &reading) {
            Ok(line) => {
                log_debug!("accepted {}", reading);
                sink.publish(&line);
            }
            Err(err) => {
                // Tags too long for the record buffer; drop the reading
                // and keep running
                log_warn!("record dropped: {}", err);
            }
        }
    }

    fn report_overflow<const N: usize>(&mut self, queue: &FrameQueue<N>) {
        let dropped = queue.stats().dropped.load(Ordering::Relaxed);
        if dropped != self.seen_drops {
            log_warn!("frame queue overflowed, {} frames lost", dropped - self.seen_drops);
            self.seen_drops = dropped;
        }
    }
}
