use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::ops::arithmetic::scalar_like;
use crate::ops::{all_same_shape, with_scalar_operand, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static PROD: OpSpec = OpSpec {
    name: "prod",
    arity: Arity::Exact(2),
    shape: all_same_shape,
    forward: prod_forward,
    backward: prod_backward,
};

pub(crate) static PROD_SCALAR: OpSpec = OpSpec {
    name: "prod_scalar",
    arity: Arity::Exact(2),
    shape: with_scalar_operand,
    forward: prod_scalar_forward,
    backward: prod_scalar_backward,
};

fn prod_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    operands[0].zip_map(operands[1], "prod", |a, b| a * b)
}

fn prod_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let (a, b) = (ctx.operands[0], ctx.operands[1]);
    let grad_a = ctx.grad.zip_map(b, "prod_backward", |g, b| g * b)?;
    let grad_b = ctx.grad.zip_map(a, "prod_backward", |g, a| g * a)?;
    Ok(vec![grad_a, grad_b])
}

fn prod_scalar_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    Ok(operands[0].scale(operands[1].data()[0]))
}

fn prod_scalar_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let (a, s) = (ctx.operands[0], ctx.operands[1]);
    let grad_a = ctx.grad.scale(s.data()[0]);
    let total: f64 = ctx.grad.data().iter().zip(a.data()).map(|(g, a)| g * a).sum();
    Ok(vec![grad_a, scalar_like(total, s)?])
}

impl Graph {
    /// Element-wise (Hadamard) product.
    pub fn prod(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Prod, &[a, b])
    }

    /// `a * s` where `s` holds a single element.
    pub fn prod_scalar(&mut self, a: NodeId, s: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::ProdScalar, &[a, s])
    }
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
