//! Error types for the decoder
//!
//! The decoder itself has no fatal error path: malformed pulses, bad frames,
//! and queue overflow all degrade to "no valid reading" and are tracked by
//! counters rather than surfaced as errors. What remains error-shaped is
//! configuration validation and record formatting, and both follow the
//! constraints embedded use imposes:
//!
//! 1. **Small size**: every variant is inline data, no heap.
//! 2. **Copy semantics**: errors are returned from hot paths and may cross
//!    the interrupt/foreground boundary.
//! 3. **Static messages**: `&'static str` only, deterministic memory usage.

use thiserror_no_std::Error;

/// Result type for decoder operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Decoder errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Timing configuration would misclassify pulses
    #[error("invalid timing configuration: {reason}")]
    ConfigInvalid {
        /// Which constraint the configuration violates
        reason: &'static str,
    },

    /// Formatted record does not fit the fixed output buffer
    #[error("record exceeds {capacity} byte buffer")]
    RecordOverflow {
        /// Capacity of the output buffer that overflowed
        capacity: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for DecodeError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ConfigInvalid { reason } =>
                defmt::write!(fmt, "invalid timing configuration: {}", reason),
            Self::RecordOverflow { capacity } =>
                defmt::write!(fmt, "record exceeds {} byte buffer", capacity),
        }
    }
}
