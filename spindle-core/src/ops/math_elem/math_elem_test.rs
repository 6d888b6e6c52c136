use crate::autograd::{check_grad, Graph};
use crate::tensor::Tensor;
use crate::utils::testing::{check_tensor_near, grad_of};

#[test]
fn test_exp_forward_backward() {
    let mut g = Graph::new();
    let x = g.new_leaf(Tensor::vector(vec![0.0, 1.0, -1.0]), true).unwrap();
    let y = g.exp(x).unwrap();
    g.backward(y, None).unwrap();
    let e = 1.0f64.exp();
    check_tensor_near(g.value(y).unwrap(), &[3], &[1.0, e, 1.0 / e], 1e-12);
    check_tensor_near(grad_of(&g, x), &[3], &[1.0, e, 1.0 / e], 1e-12);
}

#[test]
fn test_log_forward_backward() {
    let mut g = Graph::new();
    let x = g.new_leaf(Tensor::vector(vec![1.0, 2.0, 4.0]), true).unwrap();
    let y = g.log(x).unwrap();
    let seed = Tensor::vector(vec![1.0, 2.0, 2.0]);
    g.backward(y, Some(seed)).unwrap();
    check_tensor_near(g.value(y).unwrap(), &[3], &[0.0, 2f64.ln(), 4f64.ln()], 1e-12);
    check_tensor_near(grad_of(&g, x), &[3], &[1.0, 1.0, 0.5], 1e-12);
}

#[test]
fn test_log_of_zero_is_negative_infinity() {
    let mut g = Graph::new();
    let x = g.constant(Tensor::scalar(0.0)).unwrap();
    let y = g.log(x).unwrap();
    assert_eq!(g.value(y).unwrap().item().unwrap(), f64::NEG_INFINITY);
}

#[test]
fn test_exp_log_grad_check() {
    let x = Tensor::matrix(2, 2, vec![0.5, 1.5, 2.5, 3.5]).unwrap();
    assert_eq!(check_grad(|g, ids| g.exp(ids[0]), &[x.clone()], 1e-6, 1e-4), Ok(()));
    assert_eq!(
        check_grad(
            |g, ids| {
                let l = g.log(ids[0])?;
                g.exp(l)
            },
            &[x],
            1e-6,
            1e-4
        ),
        Ok(())
    );
}
