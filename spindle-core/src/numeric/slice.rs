use super::Numeric;
use crate::error::SpindleError;

const EQUAL_TOLERANCE: f64 = 1.0e-6;

/// Whether `a` and `b` agree within an absolute or relative tolerance of 1e-6.
pub fn equal_approx(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    if diff <= EQUAL_TOLERANCE {
        return true;
    }
    diff / a.abs().max(b.abs()) <= EQUAL_TOLERANCE
}

/// Returns an owned copy of `v`.
pub fn copy<T: Copy>(v: &[T]) -> Vec<T> {
    v.to_vec()
}

/// Sets every element of `v` to `value`.
pub fn fill<T: Copy>(v: &mut [T], value: T) {
    v.iter_mut().for_each(|e| *e = value);
}

/// -1, 0 or +1 depending on the sign of `a`.
pub fn sign<T: Numeric>(a: T) -> i32 {
    if a < T::zero() {
        -1
    } else if a > T::zero() {
        1
    } else {
        0
    }
}

/// Parses whitespace-separated floats, e.g. `"1.0 -2.5 3"`.
pub fn parse_f64_slice(s: &str) -> Result<Vec<f64>, SpindleError> {
    s.split_whitespace()
        .map(|tok| {
            tok.parse::<f64>()
                .map_err(|e| SpindleError::ParseError(format!("'{}': {}", tok, e)))
        })
        .collect()
}
