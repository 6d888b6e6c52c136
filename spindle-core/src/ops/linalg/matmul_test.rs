use crate::autograd::{check_grad, Graph};
use crate::error::SpindleError;
use crate::ops::linalg::matmul::matmul_kernel;
use crate::ops::linalg::transpose_kernel;
use crate::tensor::{ones, Tensor};
use crate::utils::testing::{check_tensor_near, grad_of};

#[test]
fn test_matmul_forward() {
    let a = Tensor::matrix(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let b = Tensor::matrix(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
    let output = matmul_kernel(&a, &b).unwrap();
    check_tensor_near(&output, &[2, 2], &[19.0, 22.0, 43.0, 50.0], 1e-12);
}

#[test]
fn test_matmul_forward_non_square() {
    let a = Tensor::matrix(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let b = Tensor::matrix(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
    let output = matmul_kernel(&a, &b).unwrap();
    check_tensor_near(&output, &[2, 2], &[58.0, 64.0, 139.0, 154.0], 1e-12);
}

#[test]
fn test_matmul_shape_mismatch_inner() {
    let mut g = Graph::new();
    let a = g.constant(Tensor::matrix(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap()).unwrap();
    let b = g.constant(Tensor::matrix(3, 1, vec![5.0, 6.0, 7.0]).unwrap()).unwrap();
    match g.matmul(a, b) {
        Err(SpindleError::ShapeMismatch { operation, .. }) => {
            assert_eq!(operation, "matmul (inner dim)");
        }
        other => panic!("Expected ShapeMismatch for matmul inner dimensions, got {:?}", other),
    }
}

#[test]
fn test_matmul_rejects_vectors() {
    let mut g = Graph::new();
    let a = g.constant(Tensor::vector(vec![1.0, 2.0])).unwrap();
    let b = g.constant(Tensor::matrix(2, 1, vec![1.0, 2.0]).unwrap()).unwrap();
    match g.matmul(a, b) {
        Err(SpindleError::ShapeMismatch { operation, .. }) => {
            assert_eq!(operation, "matmul (rank check)")
        }
        other => panic!("Expected rank ShapeMismatch, got {:?}", other),
    }
}

#[test]
fn test_matmul_backward_closed_form() {
    // With an all-ones seed: dA[i][k] = sum_j B[k][j], dB[k][j] = sum_i A[i][k].
    let mut g = Graph::new();
    let a = g
        .new_leaf(Tensor::matrix(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap(), true)
        .unwrap();
    let b = g
        .new_leaf(Tensor::matrix(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap(), true)
        .unwrap();
    let c = g.matmul(a, b).unwrap();
    g.backward(c, Some(ones(&[2, 2]))).unwrap();

    check_tensor_near(grad_of(&g, a), &[2, 3], &[15.0, 19.0, 23.0, 15.0, 19.0, 23.0], 1e-12);
    check_tensor_near(grad_of(&g, b), &[3, 2], &[5.0, 5.0, 7.0, 7.0, 9.0, 9.0], 1e-12);
}

#[test]
fn test_transpose_forward_backward() {
    let mut g = Graph::new();
    let a = g
        .new_leaf(Tensor::matrix(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap(), true)
        .unwrap();
    let t = g.transpose(a).unwrap();
    check_tensor_near(g.value(t).unwrap(), &[3, 2], &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0], 0.0);
    let seed = Tensor::matrix(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    g.backward(t, Some(seed.clone())).unwrap();
    assert_eq!(grad_of(&g, a), &transpose_kernel(&seed).unwrap());
}

#[test]
fn test_matmul_grad_check() {
    let a = Tensor::matrix(2, 3, vec![0.1, -0.2, 0.3, 0.4, 0.5, -0.6]).unwrap();
    let b = Tensor::matrix(3, 2, vec![1.0, -1.0, 0.5, 2.0, -0.5, 0.25]).unwrap();
    assert_eq!(
        check_grad(
            |g, ids| {
                let c = g.matmul(ids[0], ids[1])?;
                let t = g.transpose(c)?;
                g.sigmoid(t)
            },
            &[a, b],
            1e-6,
            1e-4
        ),
        Ok(())
    );
}
