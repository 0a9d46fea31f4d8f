//! Custom Timing Configuration Example
//!
//! Shows how the classification windows are configured and validated, and
//! why overlapping tolerance windows are refused: with a wide enough
//! tolerance a 0-bit low period and a 1-bit low period become
//! indistinguishable, and the decoder would rather not start than
//! misread frames.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_custom_timing
//! ```

use nexusrx_core::{
    config::{DecoderConfig, PulseTiming},
    frame::Frame,
    queue::FrameQueue,
    receiver::NexusReceiver,
};

fn main() {
    println!("NexusRx Timing Configuration Example");
    println!("====================================\n");

    // The canonical Nexus windows
    let timing = PulseTiming::nexus();
    println!("Canonical timing:");
    println!("  marker: {}µs  0-bit: {}µs  1-bit: {}µs  separator: {}µs  ±{}µs",
        timing.marker_us, timing.zero_gap_us, timing.one_gap_us,
        timing.frame_gap_us, timing.tolerance_us);
    println!("  validate: {:?}\n", timing.validate());

    // A tolerance of 300µs makes the marker window reach into the 0-bit
    // window; validation refuses it
    let sloppy = PulseTiming { tolerance_us: 300, ..PulseTiming::nexus() };
    println!("Tolerance widened to ±300µs:");
    println!("  validate: {:?}\n", sloppy.validate());

    let config = DecoderConfig {
        pin: 2,
        timing,
        ..DecoderConfig::default()
    };
    config.validate().expect("canonical configuration is valid");
    println!("Decoder configured for pin {} at {}ms ticks\n", config.pin, config.tick_interval_ms);

    // A transmitter running ~8% fast still lands inside the windows
    let queue = FrameQueue::<16>::new();
    let mut receiver = NexusReceiver::new(config.timing, &queue);
    let frame = Frame::compose(42, true, 0, 180, 55);

    let mut now = 10_000;
    receiver.on_edge(true, now);
    for bit in (0..36).rev() {
        now += 460; // nominal 500
        receiver.on_edge(false, now);
        now += if (frame.raw() >> bit) & 1 == 1 { 1_930 } else { 960 };
        receiver.on_edge(true, now);
    }
    now += 460;
    receiver.on_edge(false, now);
    now += 3_950;
    receiver.on_edge(true, now);

    match queue.pop() {
        Some(decoded) => {
            println!("Fast transmitter decoded anyway: {}", decoded.reading());
        }
        None => println!("Frame lost"),
    }
}
