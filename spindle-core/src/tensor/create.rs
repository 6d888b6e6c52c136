// src/tensor/create.rs

use crate::error::SpindleError;
use crate::random::Source;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Creates a tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Tensor {
    full(shape, 0.0)
}

/// Creates a tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Tensor {
    full(shape, 1.0)
}

/// Creates a tensor filled with `value` with the specified shape.
pub fn full(shape: &[usize], value: f64) -> Tensor {
    let numel = shape.iter().product();
    Tensor {
        data: Arc::new(vec![value; numel]),
        shape: shape.to_vec(),
    }
}

/// Creates a tensor filled with zeros, having the same shape as `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Tensor {
    zeros(tensor.shape())
}

/// Creates a tensor filled with ones, having the same shape as `tensor`.
pub fn ones_like(tensor: &Tensor) -> Tensor {
    ones(tensor.shape())
}

impl Tensor {
    /// `n x n` identity matrix.
    pub fn eye(n: usize) -> Tensor {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Tensor {
            data: Arc::new(data),
            shape: vec![n, n],
        }
    }

    /// Samples every element uniformly from `[lo, hi)` using `source`.
    pub fn rand_uniform(
        shape: &[usize],
        lo: f64,
        hi: f64,
        source: &Source,
    ) -> Result<Tensor, SpindleError> {
        let mut data = vec![0.0; shape.iter().product()];
        source.fill_uniform(&mut data, lo, hi)?;
        Tensor::new(data, shape.to_vec())
    }

    /// Samples every element from `N(mean, std_dev^2)` using `source`.
    pub fn randn(
        shape: &[usize],
        mean: f64,
        std_dev: f64,
        source: &Source,
    ) -> Result<Tensor, SpindleError> {
        let mut data = vec![0.0; shape.iter().product()];
        source.fill_normal(&mut data, mean, std_dev)?;
        Tensor::new(data, shape.to_vec())
    }
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
