//! In-place parameter initializers.
//!
//! Every initializer draws through a caller-supplied [`Source`], so a seeded
//! run initializes identically every time.

use crate::error::SpindleError;
use crate::nn::Parameter;
use crate::random::Source;
use crate::tensor::{full, Tensor};

/// `(fan_in, fan_out)` of a shape: `[out, in]` for matrices, `n` for both on
/// vectors, `1` for scalars.
fn fans(shape: &[usize]) -> (usize, usize) {
    match shape {
        [] => (1, 1),
        [n] => (*n, *n),
        [rows, cols] => (*cols, *rows),
        [rows, rest @ ..] => (rest.iter().product(), *rows),
    }
}

impl Tensor {
    /// Samples from `U(-a, a)` with `a = gain * sqrt(6 / (fan_in + fan_out))`.
    pub fn xavier_uniform(
        shape: &[usize],
        gain: f64,
        source: &Source,
    ) -> Result<Tensor, SpindleError> {
        let (fan_in, fan_out) = fans(shape);
        if fan_in + fan_out == 0 {
            return Err(SpindleError::EmptyTensor);
        }
        let bound = gain * (6.0 / (fan_in + fan_out) as f64).sqrt();
        if !(bound > 0.0) {
            return Err(SpindleError::InvalidArgument(format!(
                "xavier_uniform gain must be positive, got {}",
                gain
            )));
        }
        Tensor::rand_uniform(shape, -bound, bound, source)
    }
}

/// Fills `param` with Xavier/Glorot uniform samples.
pub fn xavier_uniform_(param: &Parameter, gain: f64, source: &Source) -> Result<(), SpindleError> {
    param.set_value(Tensor::xavier_uniform(&param.shape(), gain, source)?)
}

/// Fills `param` with samples from `N(mean, std_dev^2)`.
pub fn normal_(
    param: &Parameter,
    mean: f64,
    std_dev: f64,
    source: &Source,
) -> Result<(), SpindleError> {
    param.set_value(Tensor::randn(&param.shape(), mean, std_dev, source)?)
}

pub fn zeros_(param: &Parameter) -> Result<(), SpindleError> {
    constant_(param, 0.0)
}

pub fn constant_(param: &Parameter, value: f64) -> Result<(), SpindleError> {
    param.set_value(full(&param.shape(), value))
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
