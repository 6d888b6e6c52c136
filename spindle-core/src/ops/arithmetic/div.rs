use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::ops::{all_same_shape, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static DIV: OpSpec = OpSpec {
    name: "div",
    arity: Arity::Exact(2),
    shape: all_same_shape,
    forward: div_forward,
    backward: div_backward,
};

/// Division by zero follows IEEE semantics.
fn div_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    operands[0].zip_map(operands[1], "div", |a, b| a / b)
}

// d(a/b)/da = 1/b, d(a/b)/db = -a/b^2 = -out/b
fn div_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let b = ctx.operands[1];
    let grad_a = ctx.grad.zip_map(b, "div_backward", |g, b| g / b)?;
    let grad_out_over_b = ctx.output.zip_map(b, "div_backward", |y, b| y / b)?;
    let grad_b = ctx.grad.zip_map(&grad_out_over_b, "div_backward", |g, q| -g * q)?;
    Ok(vec![grad_a, grad_b])
}

impl Graph {
    /// Element-wise `a / b`.
    pub fn div(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Div, &[a, b])
    }
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
