use spindle_core::{Graph, NodeId, Tensor};

/// Routes `log` output through the test harness.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Gradient data of `id`, panicking when it was never reached.
#[allow(dead_code)]
pub fn grad_data(graph: &Graph, id: NodeId) -> Vec<f64> {
    graph
        .gradient(id)
        .map(Tensor::to_vec)
        .unwrap_or_else(|| panic!("node {} has no gradient", id))
}

/// A small two-layer perceptron used by several tests:
/// `sum(tanh(relu(x . w1) . w2))`.
#[allow(dead_code)]
pub fn mlp_loss(
    graph: &mut Graph,
    x: NodeId,
    w1: NodeId,
    w2: NodeId,
) -> Result<NodeId, spindle_core::SpindleError> {
    let h = graph.matmul(x, w1)?;
    let h = graph.relu(h)?;
    let o = graph.matmul(h, w2)?;
    let o = graph.tanh(o)?;
    graph.sum(o)
}
