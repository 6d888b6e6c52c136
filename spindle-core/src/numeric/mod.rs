//! # Numeric Kernels
//!
//! Pure functions over dense numeric slices consumed by the operator set:
//! reductions (`sum`, `max`, `arg_max`, `arg_min`), a stabilized `soft_max`,
//! and a `tanh` whose fidelity is chosen through [`TanhApprox`].
//!
//! The kernels are generic over [`Numeric`], which is implemented for `f32`
//! and `f64`. Tensors in the graph are `f64`.

use num_traits::{Float, NumAssignOps};
use std::fmt::Debug;

pub mod reduce;
pub mod slice;
pub mod tanh;

pub use reduce::{arg_max, arg_min, arg_min_max, max, sum};
pub use slice::{copy, equal_approx, fill, parse_f64_slice, sign};
pub use tanh::{tanh, TanhApprox};

/// Floating point types usable by the numeric kernels.
pub trait Numeric: Float + NumAssignOps + Debug + Send + Sync + 'static {}

impl Numeric for f32 {}
impl Numeric for f64 {}

/// Softmax of `v`, stabilized by subtracting the maximum before exponentiation.
///
/// Returns an empty vector for an empty input.
pub fn soft_max<T: Numeric>(v: &[T]) -> Vec<T> {
    if v.is_empty() {
        return Vec::new();
    }
    let c = max(v);
    let exps: Vec<T> = v.iter().map(|&e| (e - c).exp()).collect();
    let total = sum(&exps);
    exps.into_iter().map(|e| e / total).collect()
}

/// Log-softmax of `v`: `x - c - ln(sum(exp(x - c)))` with `c = max(v)`.
pub fn log_soft_max<T: Numeric>(v: &[T]) -> Vec<T> {
    if v.is_empty() {
        return Vec::new();
    }
    let c = max(v);
    let mut total = T::zero();
    for &e in v {
        total += (e - c).exp();
    }
    let log_total = total.ln();
    v.iter().map(|&e| e - c - log_total).collect()
}

#[cfg(test)]
#[path = "numeric_test.rs"]
mod tests;
