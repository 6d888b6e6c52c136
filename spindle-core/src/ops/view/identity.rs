use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::ops::{same_as_operand, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static IDENTITY: OpSpec = OpSpec {
    name: "identity",
    arity: Arity::Exact(1),
    shape: same_as_operand,
    forward: identity_forward,
    backward: identity_backward,
};

fn identity_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    Ok(operands[0].clone())
}

fn identity_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    Ok(vec![ctx.grad.clone()])
}

impl Graph {
    /// A new node holding the same value as `x`.
    pub fn identity(&mut self, x: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Identity, &[x])
    }
}
