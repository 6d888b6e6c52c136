use crate::autograd::Graph;
use crate::tensor::Tensor;
use crate::utils::testing::{check_tensor_near, grad_of};

#[test]
fn test_sub_forward_backward() {
    let mut g = Graph::new();
    let a = g.new_leaf(Tensor::vector(vec![5.0, 7.0]), true).unwrap();
    let b = g.new_leaf(Tensor::vector(vec![1.0, 10.0]), true).unwrap();
    let c = g.sub(a, b).unwrap();
    check_tensor_near(g.value(c).unwrap(), &[2], &[4.0, -3.0], 0.0);
    g.backward(c, Some(Tensor::vector(vec![2.0, 3.0]))).unwrap();
    check_tensor_near(grad_of(&g, a), &[2], &[2.0, 3.0], 0.0);
    check_tensor_near(grad_of(&g, b), &[2], &[-2.0, -3.0], 0.0);
}

#[test]
fn test_sub_self_is_zero_gradient() {
    let mut g = Graph::new();
    let x = g.new_leaf(Tensor::vector(vec![3.0]), true).unwrap();
    let y = g.sub(x, x).unwrap();
    g.backward(y, None).unwrap();
    check_tensor_near(grad_of(&g, x), &[1], &[0.0], 0.0);
}

#[test]
fn test_sub_only_tracks_grad_operands() {
    let mut g = Graph::new();
    let a = g.new_leaf(Tensor::vector(vec![1.0]), true).unwrap();
    let b = g.constant(Tensor::vector(vec![2.0])).unwrap();
    let c = g.sub(a, b).unwrap();
    g.backward(c, None).unwrap();
    assert!(g.gradient(b).is_none());
    check_tensor_near(grad_of(&g, a), &[1], &[1.0], 0.0);
}
