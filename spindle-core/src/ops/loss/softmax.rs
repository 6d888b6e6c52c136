use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::numeric;
use crate::ops::{same_as_operand, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static SOFTMAX: OpSpec = OpSpec {
    name: "softmax",
    arity: Arity::Exact(1),
    shape: same_as_operand,
    forward: softmax_forward,
    backward: softmax_backward,
};

pub(crate) static LOG_SOFTMAX: OpSpec = OpSpec {
    name: "log_softmax",
    arity: Arity::Exact(1),
    shape: same_as_operand,
    forward: log_softmax_forward,
    backward: log_softmax_backward,
};

fn softmax_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    let x = operands[0];
    Tensor::new(numeric::soft_max(x.data()), x.shape().to_vec())
}

// dx = y * (g - <g, y>)
fn softmax_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let y = ctx.output;
    let dot: f64 = y.data().iter().zip(ctx.grad.data()).map(|(y, g)| y * g).sum();
    Ok(vec![y.zip_map(ctx.grad, "softmax_backward", |y, g| y * (g - dot))?])
}

fn log_softmax_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    let x = operands[0];
    Tensor::new(numeric::log_soft_max(x.data()), x.shape().to_vec())
}

// dx = g - softmax(x) * sum(g), with softmax(x) = exp(output)
fn log_softmax_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let total = numeric::sum(ctx.grad.data());
    Ok(vec![ctx
        .output
        .zip_map(ctx.grad, "log_softmax_backward", |ly, g| g - ly.exp() * total)?])
}

impl Graph {
    /// Softmax over all elements of `x`.
    pub fn softmax(&mut self, x: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::SoftMax, &[x])
    }

    /// `x - log(sum(exp(x)))` over all elements of `x`.
    pub fn log_softmax(&mut self, x: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::LogSoftMax, &[x])
    }
}
