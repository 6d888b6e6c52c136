//! # Linear algebra operators
//!
//! Both operators work on rank-2 tensors only.
//!
//! - [`matmul`]: `A (m x k) . B (k x n) -> (m x n)`.
//! - [`transpose`]: `A (m x n) -> (n x m)`.

pub mod matmul;
pub mod transpose;

pub(crate) use transpose::transpose_kernel;
