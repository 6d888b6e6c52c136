// src/tensor/mod.rs

use crate::error::SpindleError;
use std::fmt;
use std::sync::Arc;

pub mod create;

pub use create::{full, ones, ones_like, zeros, zeros_like};

/// A dense, row-major `f64` tensor.
///
/// The element buffer sits behind an `Arc`, so cloning a `Tensor` is cheap
/// and never copies data. Tensors are immutable: every operation builds a new
/// value. This makes them `Send + Sync`, which is what lets a parameter value
/// be read from several graph-building threads at once.
///
/// Shapes of rank 0 (scalars), 1 (vectors) and 2 (matrices) are what the
/// operator set works with; higher ranks are representable but only
/// elementwise operators accept them.
#[derive(Clone, PartialEq)]
pub struct Tensor {
    data: Arc<Vec<f64>>,
    shape: Vec<usize>,
}

impl Tensor {
    /// Creates a tensor from row-major `data` and a `shape`.
    ///
    /// # Errors
    /// `TensorCreationError` if `data.len()` is not the product of `shape`.
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, SpindleError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(SpindleError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Tensor {
            data: Arc::new(data),
            shape,
        })
    }

    /// A rank-0 tensor holding `value`.
    pub fn scalar(value: f64) -> Self {
        Tensor {
            data: Arc::new(vec![value]),
            shape: Vec::new(),
        }
    }

    /// A rank-1 tensor over `data`.
    pub fn vector(data: Vec<f64>) -> Self {
        let shape = vec![data.len()];
        Tensor {
            data: Arc::new(data),
            shape,
        }
    }

    /// A `rows x cols` matrix from row-major `data`.
    pub fn matrix(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, SpindleError> {
        Tensor::new(data, vec![rows, cols])
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The row-major element buffer.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.as_ref().clone()
    }

    /// The single element of a one-element tensor.
    pub fn item(&self) -> Result<f64, SpindleError> {
        if self.numel() != 1 {
            return Err(SpindleError::ShapeMismatch {
                expected: vec![],
                actual: self.shape.clone(),
                operation: "item".to_string(),
            });
        }
        Ok(self.data[0])
    }

    /// `(rows, cols)` of a rank-2 tensor.
    pub fn dims2(&self) -> Result<(usize, usize), SpindleError> {
        match self.shape.as_slice() {
            [rows, cols] => Ok((*rows, *cols)),
            other => Err(SpindleError::ShapeMismatch {
                expected: vec![0, 0],
                actual: other.to_vec(),
                operation: "dims2 (rank check)".to_string(),
            }),
        }
    }

    /// Same elements under a new shape with the same element count.
    pub fn reshape(&self, shape: Vec<usize>) -> Result<Tensor, SpindleError> {
        let numel: usize = shape.iter().product();
        if numel != self.numel() {
            return Err(SpindleError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: shape,
                operation: "reshape".to_string(),
            });
        }
        Ok(Tensor {
            data: Arc::clone(&self.data),
            shape,
        })
    }

    /// Applies `f` to every element.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Tensor {
        Tensor {
            data: Arc::new(self.data.iter().map(|&x| f(x)).collect()),
            shape: self.shape.clone(),
        }
    }

    /// Combines two same-shaped tensors element by element.
    pub fn zip_map<F: Fn(f64, f64) -> f64>(
        &self,
        other: &Tensor,
        operation: &str,
        f: F,
    ) -> Result<Tensor, SpindleError> {
        if self.shape != other.shape {
            return Err(SpindleError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: other.shape.clone(),
                operation: operation.to_string(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Tensor {
            data: Arc::new(data),
            shape: self.shape.clone(),
        })
    }

    /// Elementwise sum, used for gradient accumulation.
    pub fn add(&self, other: &Tensor) -> Result<Tensor, SpindleError> {
        self.zip_map(other, "add", |a, b| a + b)
    }

    /// Multiplies every element by `factor`.
    pub fn scale(&self, factor: f64) -> Tensor {
        self.map(|x| x * factor)
    }

    /// Whether shapes match and every element pair is within `tolerance`.
    pub fn approx_eq(&self, other: &Tensor, tolerance: f64) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("data", &self.data.as_slice())
            .finish()
    }
}

#[cfg(test)]
#[path = "tensor_test.rs"]
mod tests;
