use crate::autograd::{Graph, NodeId};
use crate::config::MathConfig;
use crate::error::SpindleError;
use crate::ops::linalg::transpose_kernel;
use crate::ops::{Arity, BackwardCtx, OpKind, OpSpec};
use crate::tensor::Tensor;

pub(crate) static MATMUL: OpSpec = OpSpec {
    name: "matmul",
    arity: Arity::Exact(2),
    shape: matmul_shape,
    forward: matmul_forward,
    backward: matmul_backward,
};

fn rank2(op: &str, shape: &[usize]) -> Result<(usize, usize), SpindleError> {
    match shape {
        [rows, cols] => Ok((*rows, *cols)),
        other => Err(SpindleError::ShapeMismatch {
            expected: vec![0, 0],
            actual: other.to_vec(),
            operation: format!("{} (rank check)", op),
        }),
    }
}

fn matmul_shape(op: &str, shapes: &[&[usize]]) -> Result<Vec<usize>, SpindleError> {
    let (m, k1) = rank2(op, shapes[0])?;
    let (k2, n) = rank2(op, shapes[1])?;
    if k1 != k2 {
        return Err(SpindleError::ShapeMismatch {
            expected: vec![k1, n],
            actual: shapes[1].to_vec(),
            operation: format!("{} (inner dim)", op),
        });
    }
    Ok(vec![m, n])
}

/// Plain row-major `A . B`.
pub(crate) fn matmul_kernel(a: &Tensor, b: &Tensor) -> Result<Tensor, SpindleError> {
    let shape = matmul_shape("matmul", &[a.shape(), b.shape()])?;
    let (m, n) = (shape[0], shape[1]);
    let k = a.shape()[1];
    let (a_data, b_data) = (a.data(), b.data());
    let mut out = vec![0.0; m * n];
    for i in 0..m {
        for p in 0..k {
            let a_ip = a_data[i * k + p];
            if a_ip == 0.0 {
                continue;
            }
            let b_row = &b_data[p * n..(p + 1) * n];
            let out_row = &mut out[i * n..(i + 1) * n];
            for (o, b_pj) in out_row.iter_mut().zip(b_row) {
                *o += a_ip * b_pj;
            }
        }
    }
    Tensor::new(out, shape)
}

fn matmul_forward(operands: &[&Tensor], _math: &MathConfig) -> Result<Tensor, SpindleError> {
    matmul_kernel(operands[0], operands[1])
}

// dA = G . B^T, dB = A^T . G
fn matmul_backward(ctx: &BackwardCtx<'_>) -> Result<Vec<Tensor>, SpindleError> {
    let (a, b) = (ctx.operands[0], ctx.operands[1]);
    let grad_a = matmul_kernel(ctx.grad, &transpose_kernel(b)?)?;
    let grad_b = matmul_kernel(&transpose_kernel(a)?, ctx.grad)?;
    Ok(vec![grad_a, grad_b])
}

impl Graph {
    /// Matrix product of two rank-2 nodes.
    pub fn matmul(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, SpindleError> {
        self.apply(OpKind::MatMul, &[a, b])
    }
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
