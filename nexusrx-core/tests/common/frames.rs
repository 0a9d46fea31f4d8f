//! Synthetic edge-timing generators for decoder tests
//!
//! Builds the (level, timestamp) event sequences a real receiver pin would
//! produce for a Nexus transmission, at the canonical pulse widths.

use nexusrx_core::frame::Frame;

/// One pin transition: (new level, timestamp in µs)
pub type Edge = (bool, u32);

/// Canonical pulse widths (µs)
const MARKER_US: u32 = 500;
const ZERO_GAP_US: u32 = 1_000;
const ONE_GAP_US: u32 = 2_000;
const FRAME_GAP_US: u32 = 4_000;

/// Edge sequence for a burst of `repeats` copies of `frame`
///
/// Starts with the rising edge that begins the first marker pulse at
/// `start_us`; each frame ends with the rising edge closing its 4000µs
/// separator gap, which doubles as the start of the next repeat.
pub fn burst_edges(frame: Frame, repeats: usize, start_us: u32) -> Vec<Edge> {
    let mut edges = vec![(true, start_us)];
    let mut now = start_us;

    for _ in 0..repeats {
        for bit in (0..36).rev() {
            now += MARKER_US;
            edges.push((false, now));
            now += if (frame.raw() >> bit) & 1 == 1 {
                ONE_GAP_US
            } else {
                ZERO_GAP_US
            };
            edges.push((true, now));
        }
        now += MARKER_US;
        edges.push((false, now));
        now += FRAME_GAP_US;
        edges.push((true, now));
    }

    edges
}

/// Edge sequence for random-width noise, alternating levels
///
/// Widths cycle through values that match none of the classification
/// windows, ending on a low level so a burst can follow.
pub fn noise_edges(transitions: usize, start_us: u32) -> Vec<Edge> {
    // None of these fall in the marker, bit, or separator windows
    let widths = [130, 740, 1_560, 2_840, 317, 3_400];
    let mut edges = Vec::with_capacity(transitions + 1);
    let mut now = start_us;
    let mut level = true;

    for i in 0..transitions {
        now += widths[i % widths.len()];
        edges.push((level, now));
        level = !level;
    }
    // Leave the pin low so a burst can follow with a rising edge
    if matches!(edges.last(), Some(&(true, _))) {
        now += 250;
        edges.push((false, now));
    }

    edges
}
