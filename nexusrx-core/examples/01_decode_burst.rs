//! Basic Burst Decoding Example
//!
//! Simulates what the pin-change interrupt would deliver for one Nexus
//! sensor transmission burst and runs it through the full decode chain:
//! edge timing → bitstream assembly → frame queue → evaluation → record.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_decode_burst
//! ```

use nexusrx_core::{
    config::PulseTiming,
    constants::DEFAULT_QUEUE_CAPACITY,
    evaluator::FrameEvaluator,
    frame::Frame,
    queue::FrameQueue,
    receiver::NexusReceiver,
    record::{RecordTags, StdoutSink},
};

/// Replay `repeats` copies of a frame as canonical-width edge timings
fn play_burst<const N: usize>(
    rx: &mut NexusReceiver<'_, N>,
    frame: Frame,
    repeats: usize,
    start_us: u32,
) -> u32 {
    let mut now = start_us;
    rx.on_edge(true, now); // burst begins, pin goes high
    for _ in 0..repeats {
        for bit in (0..36).rev() {
            now += 500;
            rx.on_edge(false, now);
            now += if (frame.raw() >> bit) & 1 == 1 { 2_000 } else { 1_000 };
            rx.on_edge(true, now);
        }
        now += 500;
        rx.on_edge(false, now);
        now += 4_000;
        rx.on_edge(true, now);
    }
    now
}

fn main() {
    println!("NexusRx Burst Decoding Example");
    println!("==============================\n");

    static FRAMES: FrameQueue<DEFAULT_QUEUE_CAPACITY> = FrameQueue::new();

    let mut receiver = NexusReceiver::new(PulseTiming::nexus(), &FRAMES);
    let mut evaluator = FrameEvaluator::new(RecordTags {
        database: "weather",
        locator: "JO65cn",
        sensor: "nexus",
    });
    let mut sink = StdoutSink;

    // A living-room sensor at 21.5°C / 46% and an outdoor one at -0.9°C / 81%
    let indoor = Frame::compose(156, true, 0, 215, 46);
    let outdoor = Frame::compose(73, false, 2, -9, 81);

    println!("Replaying indoor sensor burst (10 repeats):");
    let end = play_burst(&mut receiver, indoor, 10, 10_000);
    receiver.on_edge(false, end + 700); // carrier drops, pin settles low
    println!("  {} frames queued", FRAMES.len());
    evaluator.tick(&FRAMES, &mut sink);

    println!("\nReplaying outdoor sensor burst (10 repeats):");
    play_burst(&mut receiver, outdoor, 10, 2_000_000);
    println!("  {} frames queued", FRAMES.len());
    evaluator.tick(&FRAMES, &mut sink);

    let stats = receiver.stats();
    println!("\nReceiver statistics:");
    println!("  frames assembled: {}", stats.frames);
    println!("  desyncs:          {}", stats.desyncs);
    println!("  noise edges:      {}", stats.noise_edges);
    println!("readings accepted:  {}", evaluator.stats().accepted);
}
