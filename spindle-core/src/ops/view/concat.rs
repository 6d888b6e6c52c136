use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::ops::{Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static CONCAT: OpSpec = OpSpec {
    name: "concat",
    arity: Arity::AtLeast(1),
    shape: concat_shape,
    forward: concat_forward,
    backward: concat_backward,
};

/// Scalars and vectors are joined end to end into a vector. Matrices are
/// stacked by rows and must agree on the column count. Mixing the two
/// families is an error.
fn concat_shape(op: &str, shapes: &[&[usize]]) -> Result<Vec<usize>, SpindleError> {
    let first = shapes[0];
    if first.len() <= 1 {
        let mut total = 0;
        for shape in shapes {
            if shape.len() > 1 {
                return Err(SpindleError::ShapeMismatch {
                    expected: first.to_vec(),
                    actual: shape.to_vec(),
                    operation: format!("{} (rank)", op),
                });
            }
            total += shape.iter().product::<usize>();
        }
        return Ok(vec![total]);
    }

    let cols = match first {
        [_, cols] => *cols,
        other => {
            return Err(SpindleError::ShapeMismatch {
                expected: vec![0, 0],
                actual: other.to_vec(),
                operation: format!("{} (rank)", op),
            })
        }
    };
    let mut rows = 0;
    for shape in shapes {
        match shape {
            [r, c] if *c == cols => rows += r,
            other => {
                return Err(SpindleError::ShapeMismatch {
                    expected: vec![other.first().copied().unwrap_or(0), cols],
                    actual: other.to_vec(),
                    operation: format!("{} (columns)", op),
                })
            }
        }
    }
    Ok(vec![rows, cols])
}

fn concat_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    let shapes: Vec<&[usize]> = operands.iter().map(|t| t.shape()).collect();
    let shape = concat_shape(CONCAT.name, &shapes)?;
    let mut data = Vec::with_capacity(shape.iter().product());
    for t in operands {
        data.extend_from_slice(t.data());
    }
    Tensor::new(data, shape)
}

// Both layouts are contiguous in row-major order, so the gradient splits
// into consecutive chunks.
fn concat_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let grad = ctx.grad.data();
    let mut offset = 0;
    let mut grads = Vec::with_capacity(ctx.operands.len());
    for t in ctx.operands {
        let n = t.numel();
        grads.push(Tensor::new(grad[offset..offset + n].to_vec(), t.shape().to_vec())?);
        offset += n;
    }
    Ok(grads)
}

impl Graph {
    /// Joins vectors end to end, or stacks matrices by rows.
    pub fn concat(&mut self, xs: &[NodeId]) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::Concat, xs)
    }
}
