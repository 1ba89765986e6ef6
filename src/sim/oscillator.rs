//! Triangle-wave oscillator driving beast motion
//!
//! The resolver and the composer must sample the same time value within a
//! frame so the tested and drawn beast positions never diverge.

/// Period-2 triangle wave in [0, 1]: rises on even integer spans, falls on odd
#[inline]
pub fn triangle_wave(t: f64) -> f64 {
    let i = t.floor();
    if i.rem_euclid(2.0) == 0.0 {
        t - i
    } else {
        1.0 + i - t
    }
}

/// Beast X displacement at `time_ms`
#[inline]
pub fn beast_offset(time_ms: f64, amplitude: f32, period_ms: f64) -> f32 {
    amplitude * triangle_wave(time_ms / period_ms) as f32
}
