use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::ops::{all_same_shape, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static SUB: OpSpec = OpSpec {
    name: "sub",
    arity: Arity::Exact(2),
    shape: all_same_shape,
    forward: sub_forward,
    backward: sub_backward,
};

fn sub_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    operands[0].zip_map(operands[1], "sub", |a, b| a - b)
}

fn sub_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    Ok(vec![ctx.grad.clone(), ctx.grad.map(|g| -g)])
}

impl Graph {
    /// Element-wise `a - b`.
    pub fn sub(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Sub, &[a, b])
    }
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
