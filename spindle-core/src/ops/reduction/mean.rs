use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::numeric;
use crate::ops::{to_scalar, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::{full, Tensor};

pub(crate) static MEAN: OpSpec = OpSpec {
    name: "mean",
    arity: Arity::Exact(1),
    shape: to_scalar,
    forward: mean_forward,
    backward: mean_backward,
};

fn mean_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    let x = operands[0];
    Ok(Tensor::scalar(numeric::sum(x.data()) / x.numel() as f64))
}

fn mean_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let x = ctx.operands[0];
    let g = ctx.grad.item()? / x.numel() as f64;
    Ok(vec![full(x.shape(), g)])
}

impl Graph {
    /// Arithmetic mean of all elements.
    pub fn mean(&mut self, x: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Mean, &[x])
    }
}
