//! Frame timing
//!
//! The animation callback hands us timestamps; the simulation wants a delta
//! in frames (1.0 = one frame at 60 Hz) kept inside a sane window.

use crate::consts::{MAX_DELTA, MIN_DELTA, NOMINAL_FPS};

/// Clamp a raw frame delta into [`MIN_DELTA`, `MAX_DELTA`]; non-finite becomes 1.0
pub fn clamp_delta(raw: f32) -> f32 {
    if !raw.is_finite() {
        return 1.0;
    }
    raw.clamp(MIN_DELTA, MAX_DELTA)
}

/// Delta in frames between two animation timestamps (ms)
///
/// The first frame (no previous timestamp) counts as exactly one frame.
pub fn frame_delta(last_ms: Option<f64>, now_ms: f64) -> f32 {
    match last_ms {
        Some(last) => clamp_delta(((now_ms - last) / (1000.0 / NOMINAL_FPS)) as f32),
        None => 1.0,
    }
}

/// Wall-clock time in Unix milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_delta() {
        assert_eq!(frame_delta(None, 5000.0), 1.0);
        assert!((frame_delta(Some(1000.0), 1000.0 + 1000.0 / 60.0) - 1.0).abs() < 1e-4);
        // Stalled tab
        assert_eq!(frame_delta(Some(0.0), 5000.0), MAX_DELTA);
        // 240 Hz display
        assert_eq!(frame_delta(Some(0.0), 1000.0 / 240.0), MIN_DELTA);
        // Clock went backwards
        assert_eq!(frame_delta(Some(100.0), 50.0), MIN_DELTA);
    }

    #[test]
    fn test_clamp_rejects_non_finite() {
        assert_eq!(clamp_delta(f32::NAN), 1.0);
        assert_eq!(clamp_delta(f32::INFINITY), 1.0);
        assert_eq!(clamp_delta(1.25), 1.25);
    }
}
