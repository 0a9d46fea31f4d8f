//! Interrupt-side receiver front end
//!
//! Bundles the edge timer and the bitstream assembler behind the single
//! entry point the embedding wires into its pin-change interrupt handler.
//! Completed frames go straight into the shared queue; the handler never
//! blocks, never allocates, and holds no foreground-owned resource.
//!
//! ```rust
//! use nexusrx_core::{config::PulseTiming, queue::FrameQueue, receiver::NexusReceiver};
//!
//! static FRAMES: FrameQueue<16> = FrameQueue::new();
//!
//! let mut receiver = NexusReceiver::new(PulseTiming::nexus(), &FRAMES);
//!
//! // called from the pin-change interrupt with the new pin level and a
//! // microsecond timestamp
//! receiver.on_edge(false, 500);
//! receiver.on_edge(true, 1_500);
//! ```

use crate::assembler::{AssemblerStats, BitstreamAssembler};
use crate::config::PulseTiming;
use crate::edge::{EdgeTimer, Microseconds};
use crate::queue::FrameQueue;

/// Edge-to-queue front end, owned by the interrupt context
pub struct NexusReceiver<'q, const N: usize> {
    timer: EdgeTimer,
    assembler: BitstreamAssembler,
    queue: &'q FrameQueue<N>,
}

impl<'q, const N: usize> NexusReceiver<'q, N> {
    /// Create a receiver pushing completed frames into `queue`
    ///
    /// In firmware the queue is a `static`, making `'q = 'static` and the
    /// receiver safe to stash in the interrupt handler's state.
    pub const fn new(timing: PulseTiming, queue: &'q FrameQueue<N>) -> Self {
        Self {
            timer: EdgeTimer::new(),
            assembler: BitstreamAssembler::new(timing),
            queue,
        }
    }

    /// Feed one pin transition
    ///
    /// `level` is the pin level after the transition, `now_us` the capture
    /// timestamp. A full queue drops the frame (counted by the queue);
    /// the interrupt handler has nobody to report to.
    pub fn on_edge(&mut self, level: bool, now_us: Microseconds) {
        let edge = self.timer.transition(level, now_us);
        if let Some(frame) = self.assembler.process(edge) {
            let _ = self.queue.push(frame);
        }
    }

    /// Assembler health counters
    pub fn stats(&self) -> AssemblerStats {
        self.assembler.stats()
    }
}
