use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::numeric;
use crate::ops::{same_as_operand, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static TANH: OpSpec = OpSpec {
    name: "tanh",
    arity: Arity::Exact(1),
    shape: same_as_operand,
    forward: tanh_forward,
    backward: tanh_backward,
};

fn tanh_forward(operands: &[&Tensor], math: &MathConfig) -> Result<Tensor, SpindleError> {
    let approx = math.tanh;
    Ok(operands[0].map(|x| numeric::tanh(x, approx)))
}

// d/dx tanh(x) = 1 - tanh(x)^2, read from the cached output.
fn tanh_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let grad = ctx.output.zip_map(ctx.grad, "tanh_backward", |y, g| g * (1.0 - y * y))?;
    Ok(vec![grad])
}

impl Graph {
    /// Hyperbolic tangent, evaluated with the graph's `MathConfig::tanh`.
    pub fn tanh(&mut self, x: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Tanh, &[x])
    }
}
