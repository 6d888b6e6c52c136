use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::ops::{same_as_operand, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static EXP: OpSpec = OpSpec {
    name: "exp",
    arity: Arity::Exact(1),
    shape: same_as_operand,
    forward: exp_forward,
    backward: exp_backward,
};

fn exp_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    Ok(operands[0].map(f64::exp))
}

fn exp_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    Ok(vec![ctx.output.zip_map(ctx.grad, "exp_backward", |y, g| g * y)?])
}

impl Graph {
    pub fn exp(&mut self, x: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Exp, &[x])
    }
}
