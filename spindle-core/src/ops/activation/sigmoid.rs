use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::ops::{same_as_operand, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static SIGMOID: OpSpec = OpSpec {
    name: "sigmoid",
    arity: Arity::Exact(1),
    shape: same_as_operand,
    forward: sigmoid_forward,
    backward: sigmoid_backward,
};

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn sigmoid_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    Ok(operands[0].map(sigmoid))
}

fn sigmoid_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let grad = ctx.output.zip_map(ctx.grad, "sigmoid_backward", |y, g| g * y * (1.0 - y))?;
    Ok(vec![grad])
}

impl Graph {
    /// Logistic function `1 / (1 + e^-x)`.
    pub fn sigmoid(&mut self, x: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Sigmoid, &[x])
    }
}
