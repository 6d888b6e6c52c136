use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::numeric;
use crate::ops::{same_shape_to_scalar, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static CROSS_ENTROPY: OpSpec = OpSpec {
    name: "cross_entropy",
    arity: Arity::Exact(2),
    shape: same_shape_to_scalar,
    forward: cross_entropy_forward,
    backward: cross_entropy_backward,
};

fn cross_entropy_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    let (x, t) = (operands[0], operands[1]);
    let log_p = numeric::log_soft_max(x.data());
    let loss: f64 = log_p.iter().zip(t.data()).map(|(lp, t)| -t * lp).sum();
    Ok(Tensor::scalar(loss))
}

// dx = (softmax(x) * sum(t) - t) * g
// dt = -log_softmax(x) * g
fn cross_entropy_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let (x, t) = (ctx.operands[0], ctx.operands[1]);
    let g = ctx.grad.item()?;
    let t_total = numeric::sum(t.data());
    let log_p = numeric::log_soft_max(x.data());

    let grad_x = log_p
        .iter()
        .zip(t.data())
        .map(|(lp, t)| (lp.exp() * t_total - t) * g)
        .collect();
    let grad_t = log_p.iter().map(|lp| -lp * g).collect();
    Ok(vec![
        Tensor::new(grad_x, x.shape().to_vec())?,
        Tensor::new(grad_t, t.shape().to_vec())?,
    ])
}

impl Graph {
    /// Cross-entropy between raw scores `x` and a target distribution `t`.
    pub fn cross_entropy(&mut self, x: NodeId, target: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::CrossEntropy, &[x, target])
    }
}
