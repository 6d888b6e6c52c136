//! # Arithmetic operators
//!
//! Binary elementwise operators (`add`, `sub`, `prod`, `div`) require both
//! operands to share one shape; nothing is broadcast. The scalar variants
//! (`add_scalar`, `prod_scalar`) take a second operand holding exactly one
//! element, and their backward rules reduce the incoming gradient onto it.

use crate::error::SpindleError;
use crate::tensor::Tensor;

pub mod add;
pub mod div;
pub mod mul;
pub mod neg;
pub mod sub;

/// `total` reshaped like the single-element operand `like`.
pub(crate) fn scalar_like(total: f64, like: &Tensor) -> Result<Tensor, SpindleError> {
    Tensor::new(vec![total], like.shape().to_vec())
}
