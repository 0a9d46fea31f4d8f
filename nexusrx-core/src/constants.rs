//! Constants for the Nexus OOK decoder
//!
//! Centralized numeric values used throughout the decoder: protocol pulse
//! timing, frame geometry, queue sizing, and the foreground evaluation
//! cadence. All timing values come from the Nexus transmitter's fixed pulse
//! plan and are given in microseconds.
//!
//! ## Pulse plan
//!
//! Every bit starts with a fixed-width high pulse, followed by a low period
//! whose length carries the bit value:
//!
//! ```text
//! ──┐ 500µs ┌──────────┐ 500µs ┌───────────────────┐ 500µs ┌──
//!   └───────┘  1000µs  └───────┘       2000µs      └───────┘
//!    marker      "0"    marker           "1"         marker
//! ```
//!
//! A 4000µs low period separates consecutive frames within a burst.

/// Nominal width of the high "start of bit" marker pulse (µs)
pub const MARKER_PULSE_US: u32 = 500;

/// Nominal low-period width encoding a 0 bit (µs)
pub const ZERO_GAP_US: u32 = 1000;

/// Nominal low-period width encoding a 1 bit (µs)
pub const ONE_GAP_US: u32 = 2000;

/// Nominal low-period width separating frames within a burst (µs)
pub const FRAME_GAP_US: u32 = 4000;

/// Accepted deviation around each nominal width (µs)
///
/// Cheap transmitter RC oscillators drift with temperature and battery
/// voltage; ±100µs keeps the four windows comfortably disjoint while
/// accepting every transmitter observed in practice.
pub const PULSE_TOLERANCE_US: u32 = 100;

/// Number of data bits in a complete Nexus frame
pub const FRAME_BITS: u8 = 36;

/// Default frame queue capacity (slots)
///
/// One slot is reserved to distinguish full from empty, leaving 15 usable slots,
/// enough to absorb a full ~10-frame sensor burst even if the foreground
/// tick stalls for several seconds.
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// Queue capacity must be power of 2 for the masked index arithmetic
const _: () = assert!(
    DEFAULT_QUEUE_CAPACITY.is_power_of_two(),
    "Queue capacity must be power of 2"
);

/// Nominal interval between foreground evaluation ticks (ms)
///
/// A sensor repeats its frame ~10 times over a few seconds once every
/// ~57s, so a 1s drain cadence sees several repeats per tick.
pub const EVAL_TICK_INTERVAL_MS: u32 = 1000;

/// Capacity of the formatted output record buffer (bytes)
///
/// The record is tag text plus three short integers; 128 bytes leaves slack
/// for long database/locator tags without heap allocation.
pub const RECORD_CAPACITY: usize = 128;
