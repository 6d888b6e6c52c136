use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::ops::{Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static TRANSPOSE: OpSpec = OpSpec {
    name: "transpose",
    arity: Arity::Exact(1),
    shape: transpose_shape,
    forward: transpose_forward,
    backward: transpose_backward,
};

fn transpose_shape(op: &str, shapes: &[&[usize]]) -> Result<Vec<usize>, SpindleError> {
    match shapes[0] {
        [rows, cols] => Ok(vec![*cols, *rows]),
        other => Err(SpindleError::ShapeMismatch {
            expected: vec![0, 0],
            actual: other.to_vec(),
            operation: format!("{} (rank check)", op),
        }),
    }
}

pub(crate) fn transpose_kernel(a: &Tensor) -> Result<Tensor, SpindleError> {
    let (rows, cols) = a.dims2()?;
    let data = a.data();
    let mut out = Vec::with_capacity(rows * cols);
    for c in 0..cols {
        for r in 0..rows {
            out.push(data[r * cols + c]);
        }
    }
    Tensor::new(out, vec![cols, rows])
}

fn transpose_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    transpose_kernel(operands[0])
}

fn transpose_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    Ok(vec![transpose_kernel(ctx.grad)?])
}

impl Graph {
    pub fn transpose(&mut self, a: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Transpose, &[a])
    }
}
