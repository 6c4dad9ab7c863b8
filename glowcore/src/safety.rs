//! Safety utilities for crash-proof overlays.
//!
//! Animation math is total over its domain, but degenerate inputs (a zero
//! window extent, a radius that pulses below zero) still produce NaN or
//! negative sizes. These helpers clamp them to something drawable instead
//! of propagating an error, and isolate per-frame panics.

/// Run a closure, catching any panic. Returns the closure result on success,
/// or `fallback` on panic. Used around the per-frame tick and paint.
pub fn catch_or<T>(fallback: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(val) => val,
        Err(_) => {
            tracing::warn!("caught panic in frame, recovered");
            fallback
        }
    }
}

/// `value` if it is finite, otherwise `fallback`.
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Clamp to `>= 0`, mapping NaN and infinities to zero.
pub fn non_negative(value: f32) -> f32 {
    finite_or(value, 0.0).max(0.0)
}

/// Clamp to `0..=1`, mapping NaN to zero.
pub fn clamp_unit(value: f32) -> f32 {
    finite_or(value, 0.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_or_success() {
        assert_eq!(catch_or(0, || 42), 42);
    }

    #[test]
    fn test_catch_or_panic() {
        assert_eq!(catch_or(-1, || panic!("boom")), -1);
    }

    #[test]
    fn test_finite_or() {
        assert_eq!(finite_or(3.5, 1.0), 3.5);
        assert_eq!(finite_or(f32::NAN, 1.0), 1.0);
        assert_eq!(finite_or(f32::INFINITY, 1.0), 1.0);
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(-4.0), 0.0);
        assert_eq!(non_negative(f32::NAN), 0.0);
        assert_eq!(non_negative(f32::NEG_INFINITY), 0.0);
        assert_eq!(non_negative(7.0), 7.0);
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(1.5), 1.0);
        assert_eq!(clamp_unit(-0.5), 0.0);
        assert_eq!(clamp_unit(0.25), 0.25);
        assert_eq!(clamp_unit(f32::NAN), 0.0);
    }
}
