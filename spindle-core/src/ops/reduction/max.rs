use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::numeric;
use crate::ops::{to_scalar, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static REDUCE_MAX: OpSpec = OpSpec {
    name: "reduce_max",
    arity: Arity::Exact(1),
    shape: to_scalar,
    forward: reduce_max_forward,
    backward: reduce_max_backward,
};

fn reduce_max_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    Ok(Tensor::scalar(numeric::max(operands[0].data())))
}

/// The whole gradient goes to the first maximal element.
fn reduce_max_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let x = ctx.operands[0];
    let mut data = vec![0.0; x.numel()];
    data[numeric::arg_max(x.data())] = ctx.grad.item()?;
    Ok(vec![Tensor::new(data, x.shape().to_vec())?])
}

impl Graph {
    /// Largest element, as a scalar node.
    pub fn reduce_max(&mut self, x: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::ReduceMax, &[x])
    }
}
