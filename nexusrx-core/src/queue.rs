//! Bounded Frame Queue Between Interrupt and Foreground Contexts
//!
//! ## Overview
//!
//! The bitstream assembler runs inside the pin-change interrupt handler;
//! the frame evaluator runs in the foreground scheduling loop. This module
//! provides the single resource they share: a bounded, lock-free Single
//! Producer Single Consumer (SPSC) ring of completed 36-bit frames.
//!
//! ## Why Lock-Free?
//!
//! A mutex is not an option here: the producer is an interrupt handler and
//! must never block or spin on a foreground-held lock. The single-interrupt,
//! single-core origin of this decoder got away with plain shared memory;
//! this implementation replaces that implicit assumption with explicit
//! atomics so the contract survives ports to preemptible targets.
//!
//! ```text
//! Producer (ISR)                    Consumer (tick)
//!      ↓                                 ↓
//!   Atomic Write ────→ Ring Buffer ←── Atomic Read
//!      ↓                                 ↓
//!   Never Blocks                    Never Blocks
//! ```
//!
//! ## Overflow Policy
//!
//! When the ring is full, `push` **rejects the newest frame**: it returns
//! `false`, leaves the ring untouched, and increments
//! [`QueueStats::dropped`]. The original circular buffer silently overwrote
//! the oldest unread frame instead; rejecting keeps the producer wait-free,
//! keeps FIFO bookkeeping trivially intact, and makes the loss observable.
//! A dropped frame is cheap: sensors repeat each frame ~10 times per burst.
//!
//! ## Memory Ordering
//!
//! - **Acquire** on index loads: see all writes published before the
//!   matching release.
//! - **Release** on index stores: publish the slot write before moving the
//!   index.
//! - **Relaxed** for statistics, which do not affect correctness.
#![allow(unsafe_code)] // Required for the lock-free ring storage

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crate::frame::Frame;

/// Lock-free SPSC frame queue
///
/// `N` must be a power of two; one slot is reserved to distinguish full
/// from empty, so a `FrameQueue<16>` holds up to 15 frames.
///
/// ## Contract
///
/// Exactly one producer context may call [`push`](Self::push) and exactly
/// one consumer context may call [`pop`](Self::pop). The queue itself never
/// enforces this; it is what makes the unsafe slot access sound.
///
/// ## Example
///
/// ```rust
/// use nexusrx_core::queue::FrameQueue;
/// use nexusrx_core::frame::Frame;
///
/// static FRAMES: FrameQueue<16> = FrameQueue::new();
///
/// // Producer (interrupt handler)
/// fn on_frame_complete(frame: Frame) {
///     if !FRAMES.push(frame) {
///         // Lost to overflow; counted in FRAMES.stats().dropped
///     }
/// }
///
/// // Consumer (foreground tick)
/// fn drain() {
///     while let Some(frame) = FRAMES.pop() {
///         // Evaluate frame
///     }
/// }
/// ```
pub struct FrameQueue<const N: usize> {
    /// Ring buffer storage
    ///
    /// UnsafeCell for interior mutability; slots are only read after the
    /// producer has published them via the head index.
    buffer: UnsafeCell<[MaybeUninit<Frame>; N]>,

    /// Next write position (producer owned)
    head: AtomicUsize,

    /// Next read position (consumer owned)
    tail: AtomicUsize,

    /// Queue statistics
    stats: QueueStats,
}

/// Queue health counters
///
/// Updated with relaxed ordering; cheap enough to leave on in production.
pub struct QueueStats {
    /// Total frames pushed
    pub pushed: AtomicU32,
    /// Total frames popped
    pub popped: AtomicU32,
    /// Frames rejected because the queue was full
    pub dropped: AtomicU32,
    /// Maximum queue depth seen
    pub max_depth: AtomicU32,
}

impl QueueStats {
    const fn new() -> Self {
        Self {
            pushed: AtomicU32::new(0),
            popped: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            max_depth: AtomicU32::new(0),
        }
    }

    /// Update max depth if current is higher
    fn update_max_depth(&self, current: u32) {
        let mut max = self.max_depth.load(Ordering::Relaxed);
        while current > max {
            match self.max_depth.compare_exchange_weak(
                max,
                current,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => max = actual,
            }
        }
    }
}

impl<const N: usize> FrameQueue<N> {
    /// Create a new empty queue
    ///
    /// Const so the queue can live in a `static` shared between the
    /// interrupt handler and the foreground loop.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "FrameQueue capacity must be power of 2");
        Self {
            buffer: UnsafeCell::new([MaybeUninit::uninit(); N]),
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            stats: QueueStats::new(),
        }
    }

    /// Push a completed frame (producer context only)
    ///
    /// Returns `false` and counts the loss if the queue is full. Runs in
    /// bounded time with no allocation, safe to call from the interrupt
    /// handler.
    pub fn push(&self, frame: Frame) -> bool {
        let head = self.head.load(Ordering::Acquire);
        let next_head = (head + 1) & (N - 1); // Fast modulo for power of 2

        // Full: one slot short of tail
        if next_head == self.tail.load(Ordering::Acquire) {
            self.stats.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        // Sound because only the producer writes slots at head
        unsafe {
            let buffer = &mut *self.buffer.get();
            buffer[head].write(frame);
        }

        // Publish the write before moving head
        self.head.store(next_head, Ordering::Release);

        self.stats.pushed.fetch_add(1, Ordering::Relaxed);
        self.stats.update_max_depth(self.len() as u32);

        true
    }

    /// Pop the oldest frame (consumer context only)
    ///
    /// Returns `None` when the queue is empty. Frames come out in arrival
    /// (FIFO) order.
    pub fn pop(&self) -> Option<Frame> {
        let tail = self.tail.load(Ordering::Acquire);
        if tail == self.head.load(Ordering::Acquire) {
            return None;
        }

        // Sound because only the consumer reads slots at tail, and the
        // producer published this slot before advancing head
        let frame = unsafe {
            let buffer = &*self.buffer.get();
            buffer[tail].assume_init()
        };

        self.tail.store((tail + 1) & (N - 1), Ordering::Release);
        self.stats.popped.fetch_add(1, Ordering::Relaxed);

        Some(frame)
    }

    /// Current queue length
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);

        if head >= tail {
            head - tail
        } else {
            N - tail + head
        }
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.head.load(Ordering::Acquire) == self.tail.load(Ordering::Acquire)
    }

    /// Check if queue is full
    pub fn is_full(&self) -> bool {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        ((head + 1) & (N - 1)) == tail
    }

    /// Get queue statistics
    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }

    /// Drain all currently queued frames (consumer context only)
    pub fn drain(&self) -> QueueDrain<'_, N> {
        QueueDrain { queue: self }
    }
}

// Frame is Copy and all cross-context access goes through the atomics
unsafe impl<const N: usize> Send for FrameQueue<N> {}
unsafe impl<const N: usize> Sync for FrameQueue<N> {}

/// Iterator that pops until the queue is empty
pub struct QueueDrain<'a, const N: usize> {
    queue: &'a FrameQueue<N>,
}

impl<'a, const N: usize> Iterator for QueueDrain<'a, N> {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_fifo() {
        let queue = FrameQueue::<8>::new();

        for bits in 1..=5u64 {
            assert!(queue.push(Frame::from_raw(bits)));
        }
        assert_eq!(queue.len(), 5);

        for bits in 1..=5u64 {
            assert_eq!(queue.pop(), Some(Frame::from_raw(bits)));
        }
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn overflow_rejects_newest_once() {
        let queue = FrameQueue::<4>::new();

        // Fill queue (capacity - 1 due to ring buffer)
        for bits in 0..3u64 {
            assert!(queue.push(Frame::from_raw(bits)));
        }
        assert!(queue.is_full());

        // One push past capacity exercises the policy exactly once
        assert!(!queue.push(Frame::from_raw(99)));
        assert_eq!(queue.stats().dropped.load(Ordering::Relaxed), 1);

        // Bookkeeping intact: subsequent drain yields the original frames
        let drained: Vec<Frame> = queue.drain().collect();
        assert_eq!(drained.len(), 3);
        for (i, frame) in drained.iter().enumerate() {
            assert_eq!(frame.raw(), i as u64);
        }
    }

    #[test]
    fn drain_empties_queue() {
        let queue = FrameQueue::<16>::new();
        for bits in 0..10u64 {
            queue.push(Frame::from_raw(bits));
        }

        assert_eq!(queue.drain().count(), 10);
        assert!(queue.is_empty());
        assert_eq!(queue.stats().popped.load(Ordering::Relaxed), 10);
    }

    #[test]
    fn depth_statistics() {
        let queue = FrameQueue::<8>::new();
        for bits in 0..6u64 {
            queue.push(Frame::from_raw(bits));
        }
        queue.pop();

        assert_eq!(queue.stats().max_depth.load(Ordering::Relaxed), 6);
        assert_eq!(queue.stats().pushed.load(Ordering::Relaxed), 6);
    }

    #[test]
    fn wraps_around_many_times() {
        let queue = FrameQueue::<4>::new();

        for round in 0..20u64 {
            assert!(queue.push(Frame::from_raw(round)));
            assert_eq!(queue.pop(), Some(Frame::from_raw(round)));
        }
        assert!(queue.is_empty());
    }
}
