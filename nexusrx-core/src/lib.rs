//! Core decoder for the Nexus 433 MHz OOK weather sensor protocol
//!
//! Turns a stream of pin-edge timings from a cheap 433 MHz receiver into
//! validated 36-bit Nexus frames, then into temperature/humidity readings
//! formatted as one line of text per accepted frame.
//!
//! Key constraints:
//! - Capture side runs in a pin-change interrupt: bounded time, no
//!   allocation, no blocking
//! - Single shared resource between interrupt and foreground: a lock-free
//!   bounded frame queue
//! - No heap anywhere in the decode path
//!
//! ```no_run
//! use nexusrx_core::{
//!     config::PulseTiming,
//!     evaluator::FrameEvaluator,
//!     queue::FrameQueue,
//!     receiver::NexusReceiver,
//!     record::{RecordTags, StdoutSink},
//! };
//!
//! static FRAMES: FrameQueue<16> = FrameQueue::new();
//!
//! let mut receiver = NexusReceiver::new(PulseTiming::nexus(), &FRAMES);
//! let mut evaluator = FrameEvaluator::new(RecordTags::default());
//! let mut sink = StdoutSink;
//!
//! // interrupt context: receiver.on_edge(level, timestamp_us);
//! // foreground loop, once per second:
//! evaluator.tick(&FRAMES, &mut sink);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod assembler;
pub mod config;
pub mod constants;
pub mod edge;
pub mod errors;
pub mod evaluator;
pub mod frame;
pub mod queue;
pub mod receiver;
pub mod record;

// Public API
pub use assembler::{AssemblerStats, BitstreamAssembler};
pub use config::{DecoderConfig, PulseTiming};
pub use edge::{EdgeTimer, PulseEdge};
pub use errors::{DecodeError, DecodeResult};
pub use evaluator::{EvaluatorStats, FrameEvaluator};
pub use frame::{Frame, SensorReading};
pub use queue::FrameQueue;
pub use receiver::NexusReceiver;
pub use record::{RecordSink, RecordTags};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
