//! Bitstream assembly from classified pulse widths
//!
//! The Nexus encoding puts all information in the *low* period that follows
//! a fixed-width *high* marker pulse. The assembler therefore works in two
//! half-cycle steps that mirror the physical signal:
//!
//! - a **falling edge** ends the high pulse: if its width matches the 500µs
//!   marker window, the next low period is a bit slot;
//! - a **rising edge** ends the low period: with the marker armed, a
//!   ~1000µs low appends a 0, ~2000µs appends a 1, and ~4000µs is the frame
//!   separator that completes (or discards) the accumulated frame.
//!
//! Durations matching none of the windows cause no state change. There is
//! no explicit frame abort: malformed widths silently drift `bit_count`
//! out of step, and the stream resynchronizes only at the next well-timed
//! separator gap. Frames mangled this way carry the wrong bit count at the
//! boundary and are discarded there; [`AssemblerStats::desyncs`] counts
//! them so the drift is visible to tests and health monitoring.
//!
//! Bits accumulate MSB-first: the first bit on air ends up in the highest
//! populated bit of the 36-bit frame value.

use crate::config::PulseTiming;
use crate::constants::FRAME_BITS;
use crate::edge::PulseEdge;
use crate::frame::Frame;

/// Assembler health counters
///
/// Owned by the single producer context, so plain integers suffice, no
/// atomics needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblerStats {
    /// Complete 36-bit frames produced
    pub frames: u32,
    /// Separator gaps seen with a bit count other than 36
    pub desyncs: u32,
    /// Armed low periods matching no classification window
    pub noise_edges: u32,
}

/// Timing-classification state machine producing 36-bit frames
///
/// Runs entirely inside the pin-change interrupt handler: every method is
/// bounded, allocation-free, and touches only its own state.
#[derive(Debug, Clone)]
pub struct BitstreamAssembler {
    timing: PulseTiming,
    /// The preceding high pulse matched the marker window
    got_marker: bool,
    /// Frame bits accumulated so far, MSB-first
    accumulator: u64,
    /// Number of bits in `accumulator`
    bit_count: u8,
    stats: AssemblerStats,
}

impl BitstreamAssembler {
    /// Create an assembler with the given classification windows
    pub const fn new(timing: PulseTiming) -> Self {
        Self {
            timing,
            got_marker: false,
            accumulator: 0,
            bit_count: 0,
            stats: AssemblerStats {
                frames: 0,
                desyncs: 0,
                noise_edges: 0,
            },
        }
    }

    /// Feed one edge event; returns a frame when a separator completes one
    pub fn process(&mut self, edge: PulseEdge) -> Option<Frame> {
        if edge.level {
            self.end_of_low(edge.duration_us)
        } else {
            // Falling edge ends the high pulse: arm (or disarm) the next
            // low period as a bit slot
            self.got_marker = self.timing.is_marker(edge.duration_us);
            None
        }
    }

    /// Bits accumulated toward the current frame
    pub fn bit_count(&self) -> u8 {
        self.bit_count
    }

    /// Assembler health counters
    pub fn stats(&self) -> AssemblerStats {
        self.stats
    }

    /// Rising edge: classify the low period that just ended
    fn end_of_low(&mut self, duration_us: u32) -> Option<Frame> {
        // A low period is only a bit slot when the high pulse before it
        // was a valid marker
        if !self.got_marker {
            return None;
        }

        if self.timing.is_zero_gap(duration_us) {
            self.append_bit(0);
            None
        } else if self.timing.is_one_gap(duration_us) {
            self.append_bit(1);
            None
        } else if self.timing.is_frame_gap(duration_us) {
            self.frame_boundary()
        } else {
            self.stats.noise_edges += 1;
            None
        }
    }

    fn append_bit(&mut self, bit: u64) {
        self.accumulator = (self.accumulator << 1) | bit;
        self.bit_count += 1;
    }

    /// Separator gap: emit the frame if exactly 36 bits accumulated,
    /// then start over either way
    fn frame_boundary(&mut self) -> Option<Frame> {
        let frame = if self.bit_count == FRAME_BITS {
            self.stats.frames += 1;
            Some(Frame::from_raw(self.accumulator))
        } else {
            self.stats.desyncs += 1;
            None
        };

        self.accumulator = 0;
        self.bit_count = 0;
        frame
    }
}
