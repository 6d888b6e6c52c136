use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::numeric;
use crate::ops::{to_scalar, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::{full, Tensor};

pub(crate) static SUM: OpSpec = OpSpec {
    name: "sum",
    arity: Arity::Exact(1),
    shape: to_scalar,
    forward: sum_forward,
    backward: sum_backward,
};

fn sum_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    Ok(Tensor::scalar(numeric::sum(operands[0].data())))
}

fn sum_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let g = ctx.grad.item()?;
    Ok(vec![full(ctx.operands[0].shape(), g)])
}

impl Graph {
    /// Sum of all elements, as a scalar node.
    pub fn sum(&mut self, x: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Sum, &[x])
    }
}
