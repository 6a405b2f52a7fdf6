//! Six-segment cyclic hue ramp shared by the hue colorization codecs.
//!
//! A scalar index in `0..=RAMP_MAX` maps to an RGB triple that walks
//! red → yellow → green → cyan → blue → magenta and back toward red, one
//! channel changing linearly per segment. Small index deltas stay visually
//! distinguishable even after lossy video compression, and the pure-color
//! segment boundaries double as visual debugging landmarks.
//!
//! The inverse recovers the index from the dominant-channel ordering of the
//! triple. Segments are chosen so the forward and inverse maps agree exactly
//! for every index in `0..=1528`; `RAMP_MAX` itself wraps to pure red and is
//! indistinguishable from index 0 — the cyclic endpoint ambiguity inherent
//! to the ramp.

/// Highest ramp index. The ramp holds `RAMP_MAX + 1` color steps:
/// six segments of 255 values each, minus the shared wrap point.
pub const RAMP_MAX: u16 = 1529;

/// Map a ramp index to its RGB triple.
///
/// Segment table (inclusive upper bounds):
///
/// ```text
///     0..= 255   (255, n,      0)   red    → yellow
///   256..= 510   (510-n, 255,  0)   yellow → green
///   511..= 765   (0, 255,  n-510)   green  → cyan
///   766..=1020   (0, 1020-n, 255)   cyan   → blue
///  1021..=1275   (n-1020, 0, 255)   blue   → magenta
///  1276..=1529   (255, 0, 1529-n)   magenta→ red
/// ```
pub fn index_to_rgb(n: u16) -> [u8; 3] {
    debug_assert!(n <= RAMP_MAX);
    match n {
        0..=255 => [255, n as u8, 0],
        256..=510 => [(510 - n) as u8, 255, 0],
        511..=765 => [0, 255, (n - 510) as u8],
        766..=1020 => [0, (1020 - n) as u8, 255],
        1021..=1275 => [(n - 1020) as u8, 0, 255],
        _ => [255, 0, (RAMP_MAX - n.min(RAMP_MAX)) as u8],
    }
}

/// Recover a ramp index from an RGB triple.
///
/// The dominant channel picks the half of the ramp, the two recessive
/// channels pin the index inside it. Branch order matters at exact segment
/// seams: pure magenta `(255,0,255)` must resolve through the blue-dominant
/// branch to invert [`index_to_rgb`] exactly. Triples that never appear on
/// the ramp (lossy-compression noise) still land on the nearest consistent
/// index, clamped into `0..=RAMP_MAX`.
pub fn rgb_to_index(rgb: [u8; 3]) -> u16 {
    let [r, g, b] = rgb.map(i32::from);
    let n = if r >= g && g >= b {
        g - b
    } else if g >= r && g >= b {
        b - r + 510
    } else if b >= g && b >= r {
        r - g + 1020
    } else {
        g - b + i32::from(RAMP_MAX)
    };
    n.clamp(0, i32::from(RAMP_MAX)) as u16
}
