//! HyperLogLog accuracy and storage theory
//!
//! Reference values used to put measured estimator behaviour in context. The
//! relative standard error of HLL with `m = 2^p` registers is approximately
//! `1.04 / sqrt(m)`.
//!
//! | Precision | Registers | Error |
//! |-----------|-----------|-------|
//! | 10 | 1024 | ~3.25% |
//! | 12 | 4096 | ~1.63% |
//! | 14 | 16384 | ~0.81% |
//!
//! # Example
//!
//! ```
//! use sketchcmp::cardinality::{error_for_precision, theoretical_error_pct};
//!
//! assert!((error_for_precision(14) - 0.008125).abs() < 1e-9);
//! assert_eq!(theoretical_error_pct(3), None);
//! ```

/// Smallest precision accepted by HLL implementations
pub const MIN_PRECISION: u8 = 4;
/// Largest precision accepted by HLL implementations
pub const MAX_PRECISION: u8 = 18;

/// Register count (one byte per register in a dense sketch)
pub fn memory_for_precision(precision: u8) -> usize {
    1usize << precision
}

/// Expected relative standard error as a fraction
pub fn error_for_precision(precision: u8) -> f64 {
    let m = memory_for_precision(precision) as f64;
    1.04 / m.sqrt()
}

/// Expected relative standard error in percent, for a precision read out of
/// a grouping factor; `None` outside the valid precision range
pub fn theoretical_error_pct(precision: i64) -> Option<f64> {
    let precision = u8::try_from(precision).ok()?;
    (MIN_PRECISION..=MAX_PRECISION)
        .contains(&precision)
        .then(|| error_for_precision(precision) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_precision() {
        let e14 = error_for_precision(14);
        assert!(e14 > 0.007 && e14 < 0.009);

        let e12 = error_for_precision(12);
        assert!(e12 > e14);
    }

    #[test]
    fn test_theoretical_error_pct() {
        assert!((theoretical_error_pct(10).unwrap() - 3.25).abs() < 1e-9);
        assert!((theoretical_error_pct(12).unwrap() - 1.625).abs() < 1e-9);
        assert_eq!(theoretical_error_pct(19), None);
        assert_eq!(theoretical_error_pct(-1), None);
    }
}
