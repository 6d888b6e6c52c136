use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::ops::{same_as_operand, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static LOG: OpSpec = OpSpec {
    name: "log",
    arity: Arity::Exact(1),
    shape: same_as_operand,
    forward: ln_forward,
    backward: ln_backward,
};

/// Natural logarithm. Non-positive inputs follow IEEE semantics
/// (`-inf` at zero, `NaN` below).
fn ln_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    Ok(operands[0].map(f64::ln))
}

fn ln_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    Ok(vec![ctx.operands[0].zip_map(ctx.grad, "ln_backward", |x, g| g / x)?])
}

impl Graph {
    /// Natural logarithm, element-wise.
    pub fn log(&mut self, x: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Log, &[x])
    }
}
