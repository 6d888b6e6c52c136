use thiserror::Error;

/// Custom error type for the Spindle autodiff core.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum SpindleError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Unknown operator: '{0}'")]
    UnknownOperator(String),

    #[error("Operator {operator} expects {expected} operand(s), got {actual}")]
    ArityMismatch {
        operator: String,
        expected: String,
        actual: usize,
    },

    #[error("Invalid node: index {index} does not exist in a graph of {len} node(s)")]
    InvalidNode { index: usize, len: usize },

    #[error("Node belongs to a different graph")]
    ForeignNode,

    #[error("Node {index} was released and no longer holds a value")]
    NodeReleased { index: usize },

    #[error("Cannot register an empty tensor in the graph")]
    EmptyTensor,

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Backward error: {0}")]
    BackwardError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
