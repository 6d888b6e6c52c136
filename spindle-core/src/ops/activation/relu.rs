use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::ops::{same_as_operand, Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static RELU: OpSpec = OpSpec {
    name: "relu",
    arity: Arity::Exact(1),
    shape: same_as_operand,
    forward: relu_forward,
    backward: relu_backward,
};

fn relu_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    Ok(operands[0].map(|x| if x > 0.0 { x } else { 0.0 }))
}

/// The derivative at exactly zero is taken as zero.
fn relu_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let grad = ctx.operands[0].zip_map(ctx.grad, "relu_backward", |x, g| {
        if x > 0.0 {
            g
        } else {
            0.0
        }
    })?;
    Ok(vec![grad])
}

impl Graph {
    /// Rectified Linear Unit, `max(0, x)` element-wise.
    pub fn relu(&mut self, x: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::ReLU, &[x])
    }
}
