// src/ops/loss/mod.rs

//! # Normalizations and Loss Functions
//!
//! `softmax` and `log_softmax` treat all elements of their operand as one
//! distribution. The losses reduce two same-shaped operands (prediction and
//! target) to a scalar.
//!
//! - [`softmax`](softmax): max-shifted softmax and log-softmax.
//! - [`cross_entropy`]: `-sum(t * log_softmax(x))` over raw scores `x`.
//! - [`mse`]: mean squared error.

pub mod cross_entropy;
pub mod mse;
pub mod softmax;

#[cfg(test)]
#[path = "loss_test.rs"]
mod tests;
