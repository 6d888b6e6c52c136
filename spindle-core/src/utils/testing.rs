use crate::autograd::{Graph, NodeId};
use crate::tensor::Tensor;

/// Checks that `actual` has `expected_shape` and every element is within
/// `tolerance` of `expected_data`.
/// Panics with the first offending index otherwise.
pub fn check_tensor_near(
    actual: &Tensor,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(
        actual.numel(),
        expected_data.len(),
        "Data length mismatch"
    );
    for (i, (a, e)) in actual.data().iter().zip(expected_data.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Gradient of `id`, panicking if the backward pass never reached it.
pub fn grad_of<'g>(graph: &'g Graph, id: NodeId) -> &'g Tensor {
    graph
        .gradient(id)
        .unwrap_or_else(|| panic!("node {} has no gradient", id))
}

/// Routes `log` output through the test harness. Safe to call repeatedly.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
