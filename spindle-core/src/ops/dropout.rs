use crate::autograd::{Graph, NodeId};
use crate::error::SpindleError;
use crate::ops::OpKind;
use crate::random::Source;
use crate::tensor::Tensor;
use log::trace;

/// Inverted dropout: zeroes each element of `x` with probability `p` and
/// scales the survivors by `1 / (1 - p)`.
///
/// The mask is drawn from `source` and recorded as a constant leaf, so the
/// backward pass sees an ordinary `prod`. With `p == 0` the call returns `x`
/// itself and draws nothing.
///
/// # Errors
/// `InvalidArgument` unless `0 <= p < 1`.
pub fn dropout(
    graph: &mut Graph,
    x: NodeId,
    p: f64,
    source: &Source,
) -> Result<NodeId, SpindleError> {
    if !(0.0..1.0).contains(&p) {
        return Err(SpindleError::InvalidArgument(format!(
            "dropout probability must be in [0, 1), got {}",
            p
        )));
    }
    let shape = graph.value(x)?.shape().to_vec();
    if p == 0.0 {
        return Ok(x);
    }

    let keep = 1.0 - p;
    let mut mask = vec![0.0; shape.iter().product()];
    source.fill_uniform(&mut mask, 0.0, 1.0)?;
    for m in mask.iter_mut() {
        *m = if *m < keep { 1.0 / keep } else { 0.0 };
    }
    trace!(
        "dropout p={}: kept {}/{}",
        p,
        mask.iter().filter(|&&m| m != 0.0).count(),
        mask.len()
    );
    let mask = graph.constant(Tensor::new(mask, shape)?)?;
    graph.apply(OpKind::Prod, &[x, mask])
}
