//! # spindle-core
//!
//! Reverse-mode automatic differentiation over an explicit, arena-backed
//! computation graph.
//!
//! - [`tensor`]: the immutable, shareable `f64` tensor value.
//! - [`autograd`]: the [`Graph`] arena, its nodes, and finite-difference
//!   gradient checking.
//! - [`ops`]: the registered operator set.
//! - [`nn`]: shared learnable [`Parameter`]s and their initializers.
//! - [`numeric`]: slice kernels (reductions, softmax, tanh approximations).
//! - [`random`]: the seeded, thread-safe random [`Source`].

pub mod autograd;
pub mod config;
pub mod error;
pub mod nn;
pub mod numeric;
pub mod ops;
pub mod random;
pub mod tensor;

pub(crate) mod utils;

pub use autograd::{Graph, NodeId};
pub use config::{GraphConfig, MathConfig};
pub use error::SpindleError;
pub use nn::Parameter;
pub use ops::OpKind;
pub use random::Source;
pub use tensor::Tensor;
