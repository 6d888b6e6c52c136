//! # Reverse-mode automatic differentiation
//!
//! [`Graph`] records a computation as an arena of [`Node`]s. Values are
//! computed when a node is created; [`Graph::backward`] then walks the arena
//! backwards from an output, calling each operator's backward rule and
//! summing the contributions into every operand's gradient.
//!
//! [`grad_check`] compares those analytical gradients with central finite
//! differences.

pub mod grad_check;
pub mod graph;
pub mod node;

pub use grad_check::{check_grad, check_grad_with, GradCheckError};
pub use graph::Graph;
pub use node::{Node, NodeId, NodeKind};
