//! Parameter optimizers for Spindle.
//!
//! An optimizer never touches a graph. It receives the `(parameter, gradient)`
//! pairs produced by `Graph::param_gradients` after a backward pass and writes
//! new values into the shared [`Parameter`]s. The next graph built over those
//! parameters sees the updated values.

use spindle_core::{Parameter, SpindleError, Tensor};

pub mod adam;
pub mod sgd;

pub use adam::{Adam, AdamConfig};
pub use sgd::{Sgd, SgdConfig};

/// Trait for optimization algorithms.
pub trait Optimizer {
    /// Performs a single optimization step over every `(parameter, gradient)`
    /// pair. Per-parameter state is keyed by [`Parameter::id`].
    fn step<'a, I>(&mut self, grads: I) -> Result<(), SpindleError>
    where
        I: IntoIterator<Item = (&'a Parameter, &'a Tensor)>;

    fn learning_rate(&self) -> f64;

    fn set_learning_rate(&mut self, lr: f64) -> Result<(), SpindleError>;
}

pub(crate) fn check_learning_rate(lr: f64) -> Result<(), SpindleError> {
    if lr > 0.0 && lr.is_finite() {
        Ok(())
    } else {
        Err(SpindleError::ConfigurationError(format!(
            "learning rate must be positive and finite, got {}",
            lr
        )))
    }
}

pub(crate) fn check_grad_shape(param: &Parameter, grad: &Tensor) -> Result<(), SpindleError> {
    let shape = param.shape();
    if shape.as_slice() != grad.shape() {
        return Err(SpindleError::ShapeMismatch {
            expected: shape,
            actual: grad.shape().to_vec(),
            operation: format!("optimizer step ({})", param.name()),
        });
    }
    Ok(())
}
