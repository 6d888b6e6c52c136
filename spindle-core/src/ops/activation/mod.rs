// src/ops/activation/mod.rs

//! # Activation Functions
//!
//! Elementwise non-linearities. Each backward rule works from the values the
//! graph already holds: ReLU masks on the operand, Tanh and Sigmoid use the
//! node's own output.
//!
//! - [`relu`]: `max(0, x)`.
//! - [`tanh`]: hyperbolic tangent at the graph's configured precision.
//! - [`sigmoid`]: logistic function.

pub mod relu;
pub mod sigmoid;
pub mod tanh;

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
