use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::ops::{same_as_operand, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static NEG: OpSpec = OpSpec {
    name: "neg",
    arity: Arity::Exact(1),
    shape: same_as_operand,
    forward: neg_forward,
    backward: neg_backward,
};

fn neg_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    Ok(operands[0].map(|x| -x))
}

fn neg_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    Ok(vec![ctx.grad.map(|g| -g)])
}

impl Graph {
    pub fn neg(&mut self, x: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Neg, &[x])
    }
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
