use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::ops::{same_shape_to_scalar, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static MSE: OpSpec = OpSpec {
    name: "mse",
    arity: Arity::Exact(2),
    shape: same_shape_to_scalar,
    forward: mse_forward,
    backward: mse_backward,
};

fn mse_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    let (a, b) = (operands[0], operands[1]);
    let squared: f64 = a.data().iter().zip(b.data()).map(|(a, b)| (a - b) * (a - b)).sum();
    Ok(Tensor::scalar(squared / a.numel() as f64))
}

fn mse_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let (a, b) = (ctx.operands[0], ctx.operands[1]);
    let factor = 2.0 * ctx.grad.item()? / a.numel() as f64;
    let grad_a = a.zip_map(b, "mse_backward", |a, b| (a - b) * factor)?;
    let grad_b = grad_a.map(|d| -d);
    Ok(vec![grad_a, grad_b])
}

impl Graph {
    /// Mean squared error between `prediction` and `target`.
    pub fn mse(&mut self, prediction: NodeId, target: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Mse, &[prediction, target])
    }
}
