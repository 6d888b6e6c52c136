use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::ops::arithmetic::scalar_like;
use crate::ops::{all_same_shape, with_scalar_operand, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static ADD: OpSpec = OpSpec {
    name: "add",
    arity: Arity::Exact(2),
    shape: all_same_shape,
    forward: add_forward,
    backward: add_backward,
};

pub(crate) static ADD_SCALAR: OpSpec = OpSpec {
    name: "add_scalar",
    arity: Arity::Exact(2),
    shape: with_scalar_operand,
    forward: add_scalar_forward,
    backward: add_scalar_backward,
};

fn add_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    operands[0].zip_map(operands[1], "add", |a, b| a + b)
}

fn add_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    Ok(vec![ctx.grad.clone(), ctx.grad.clone()])
}

fn add_scalar_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    let s = operands[1].data()[0];
    Ok(operands[0].map(|a| a + s))
}

fn add_scalar_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let total: f64 = ctx.grad.data().iter().sum();
    Ok(vec![ctx.grad.clone(), scalar_like(total, ctx.operands[1])?])
}

impl Graph {
    /// Element-wise `a + b` over same-shaped operands.
    pub fn add(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Add, &[a, b])
    }

    /// `a + s` where `s` holds a single element.
    pub fn add_scalar(&mut self, a: NodeId, s: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::AddScalar, &[a, s])
    }
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
