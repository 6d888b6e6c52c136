//! # Operator Set (`ops`)
//!
//! Every differentiable operation the graph can record is an [`OpKind`]. Each
//! kind resolves to a static [`OpSpec`] holding its name, arity, shape rule,
//! forward rule and backward rule. The graph never calls operator code
//! directly; it looks up the operator's `OpSpec` and goes through its
//! function pointers.
//!
//! ## Structure:
//!
//! - **Submodules:** operators are grouped by category (`activation`,
//!   `arithmetic`, `linalg`, `loss`, `math_elem`, `reduction`, `view`). Each
//!   operator file defines its forward/backward pair and the `OpSpec` static
//!   binding them, and adds a thin `Graph` method (`graph.relu(x)`).
//! - **Backward rules** receive a [`BackwardCtx`] and must return exactly one
//!   contribution per operand, in operand order, shaped like that operand.
//! - **Stochastic helpers** such as [`dropout`] are built on top of the
//!   registry from leaves and registered operators.

use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::tensor::Tensor;
use std::fmt;
use std::str::FromStr;

pub mod activation;
pub mod arithmetic;
pub mod dropout;
pub mod linalg;
pub mod loss;
pub mod math_elem;
pub mod reduction;
pub mod view;

pub use dropout::dropout;

/// Forward rule: operand values to output value.
pub type ForwardFn = fn(&[&Tensor], &MathConfig) -> Result<Tensor, SpindleError>;

/// Backward rule: one gradient contribution per operand.
pub type BackwardFn = fn(&BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError>;

/// Shape rule: validates operand shapes (given the operator name for error
/// messages) and returns the output shape.
pub type ShapeFn = fn(&str, &[&[usize]]) -> Result<Vec<usize>, SpindleError>;

/// Everything a backward rule may read.
#[derive(Debug)]
pub struct BackwardCtx<'a> {
    /// Forward values of the operands, in operand order.
    pub operands: &'a [&'a Tensor],
    /// Forward value of the node being differentiated.
    pub output: &'a Tensor,
    /// Gradient flowing into the node (shaped like `output`).
    pub grad: &'a Tensor,
    pub math: &'a MathConfig,
}

/// Number of operands an operator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exact(k) => n == k,
            Arity::AtLeast(k) => n >= k,
        }
    }

    pub(crate) fn check(self, operator: &str, n: usize) -> Result<(), SpindleError> {
        if self.accepts(n) {
            return Ok(());
        }
        Err(SpindleError::ArityMismatch {
            operator: operator.to_string(),
            expected: self.to_string(),
            actual: n,
        })
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(k) => write!(f, "exactly {}", k),
            Arity::AtLeast(k) => write!(f, "at least {}", k),
        }
    }
}

/// Registry entry of an operator.
pub struct OpSpec {
    pub name: &'static str,
    pub arity: Arity,
    pub shape: ShapeFn,
    pub forward: ForwardFn,
    pub backward: BackwardFn,
}

impl fmt::Debug for OpSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpSpec")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Tag of every registered differentiable operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Identity,
    ReLU,
    Tanh,
    Sigmoid,
    Exp,
    Log,
    Neg,
    Add,
    Sub,
    Prod,
    Div,
    AddScalar,
    ProdScalar,
    MatMul,
    Transpose,
    Sum,
    Mean,
    ReduceMax,
    Concat,
    SoftMax,
    LogSoftMax,
    CrossEntropy,
    Mse,
}

impl OpKind {
    pub const ALL: [OpKind; 23] = [
        OpKind::Identity,
        OpKind::ReLU,
        OpKind::Tanh,
        OpKind::Sigmoid,
        OpKind::Exp,
        OpKind::Log,
        OpKind::Neg,
        OpKind::Add,
        OpKind::Sub,
        OpKind::Prod,
        OpKind::Div,
        OpKind::AddScalar,
        OpKind::ProdScalar,
        OpKind::MatMul,
        OpKind::Transpose,
        OpKind::Sum,
        OpKind::Mean,
        OpKind::ReduceMax,
        OpKind::Concat,
        OpKind::SoftMax,
        OpKind::LogSoftMax,
        OpKind::CrossEntropy,
        OpKind::Mse,
    ];

    /// The registry entry for this operator.
    pub fn spec(self) -> &'static OpSpec {
        match self {
            OpKind::Identity => &view::identity::IDENTITY,
            OpKind::ReLU => &activation::relu::RELU,
            OpKind::Tanh => &activation::tanh::TANH,
            OpKind::Sigmoid => &activation::sigmoid::SIGMOID,
            OpKind::Exp => &math_elem::exp::EXP,
            OpKind::Log => &math_elem::ln::LOG,
            OpKind::Neg => &arithmetic::neg::NEG,
            OpKind::Add => &arithmetic::add::ADD,
            OpKind::Sub => &arithmetic::sub::SUB,
            OpKind::Prod => &arithmetic::mul::PROD,
            OpKind::Div => &arithmetic::div::DIV,
            OpKind::AddScalar => &arithmetic::add::ADD_SCALAR,
            OpKind::ProdScalar => &arithmetic::mul::PROD_SCALAR,
            OpKind::MatMul => &linalg::matmul::MATMUL,
            OpKind::Transpose => &linalg::transpose::TRANSPOSE,
            OpKind::Sum => &reduction::sum::SUM,
            OpKind::Mean => &reduction::mean::MEAN,
            OpKind::ReduceMax => &reduction::max::REDUCE_MAX,
            OpKind::Concat => &view::concat::CONCAT,
            OpKind::SoftMax => &loss::softmax::SOFTMAX,
            OpKind::LogSoftMax => &loss::softmax::LOG_SOFTMAX,
            OpKind::CrossEntropy => &loss::cross_entropy::CROSS_ENTROPY,
            OpKind::Mse => &loss::mse::MSE,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Resolves a registered operator by name.
    ///
    /// # Errors
    /// `UnknownOperator` if no operator is registered under `name`.
    pub fn from_name(name: &str) -> Result<OpKind, SpindleError> {
        OpKind::ALL
            .iter()
            .copied()
            .find(|op| op.name() == name)
            .ok_or_else(|| SpindleError::UnknownOperator(name.to_string()))
    }
}

impl FromStr for OpKind {
    type Err = SpindleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpKind::from_name(s)
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// --- Shared shape rules ---

/// Any shape; the output has the operand's shape.
pub(crate) fn same_as_operand(_op: &str, shapes: &[&[usize]]) -> Result<Vec<usize>, SpindleError> {
    Ok(shapes[0].to_vec())
}

/// All operands share one shape, which is also the output shape.
pub(crate) fn all_same_shape(op: &str, shapes: &[&[usize]]) -> Result<Vec<usize>, SpindleError> {
    let first = shapes[0];
    for shape in &shapes[1..] {
        if *shape != first {
            return Err(SpindleError::ShapeMismatch {
                expected: first.to_vec(),
                actual: shape.to_vec(),
                operation: op.to_string(),
            });
        }
    }
    Ok(first.to_vec())
}

/// Same-shaped operands reduced to a scalar.
pub(crate) fn same_shape_to_scalar(
    op: &str,
    shapes: &[&[usize]],
) -> Result<Vec<usize>, SpindleError> {
    all_same_shape(op, shapes)?;
    Ok(Vec::new())
}

/// Any operand reduced to a scalar.
pub(crate) fn to_scalar(_op: &str, _shapes: &[&[usize]]) -> Result<Vec<usize>, SpindleError> {
    Ok(Vec::new())
}

/// Any first operand, second operand holding a single element.
pub(crate) fn with_scalar_operand(
    op: &str,
    shapes: &[&[usize]],
) -> Result<Vec<usize>, SpindleError> {
    let numel: usize = shapes[1].iter().product();
    if numel != 1 {
        return Err(SpindleError::ShapeMismatch {
            expected: vec![],
            actual: shapes[1].to_vec(),
            operation: format!("{} (scalar operand)", op),
        });
    }
    Ok(shapes[0].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_resolves_by_name() {
        for op in OpKind::ALL {
            assert_eq!(OpKind::from_name(op.name()).unwrap(), op);
            assert_eq!(op.to_string().parse::<OpKind>().unwrap(), op);
        }
    }

    #[test]
    fn test_registry_names_are_unique() {
        let mut names: Vec<&str> = OpKind::ALL.iter().map(|op| op.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), OpKind::ALL.len());
    }

    #[test]
    fn test_unknown_operator() {
        assert_eq!(
            OpKind::from_name("conv2d"),
            Err(SpindleError::UnknownOperator("conv2d".to_string()))
        );
    }

    #[test]
    fn test_arity_check() {
        assert!(Arity::Exact(2).accepts(2));
        assert!(!Arity::Exact(2).accepts(3));
        assert!(Arity::AtLeast(1).accepts(5));
        assert!(!Arity::AtLeast(1).accepts(0));
        match Arity::Exact(1).check("relu", 2) {
            Err(SpindleError::ArityMismatch { operator, expected, actual }) => {
                assert_eq!(operator, "relu");
                assert_eq!(expected, "exactly 1");
                assert_eq!(actual, 2);
            }
            other => panic!("expected ArityMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_shape_rules() {
        assert_eq!(all_same_shape("add", &[&[2, 3], &[2, 3]]).unwrap(), vec![2, 3]);
        assert!(all_same_shape("add", &[&[2, 3], &[3, 2]]).is_err());
        assert_eq!(with_scalar_operand("prod_scalar", &[&[4], &[1, 1]]).unwrap(), vec![4]);
        assert!(with_scalar_operand("prod_scalar", &[&[4], &[2]]).is_err());
        assert!(same_shape_to_scalar("mse", &[&[3], &[3]]).unwrap().is_empty());
    }
}
