// src/ops/reduction/mod.rs

//! Reductions of a whole tensor to a rank-0 scalar.

pub mod max;
pub mod mean;
pub mod sum;

#[cfg(test)]
#[path = "reduction_test.rs"]
mod tests;
