use crate::autograd::{Graph, NodeId};
use crate::config::GraphConfig;
use crate::error::SpindleError;
use crate::tensor::Tensor;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical_grad:?} != numerical {numerical_grad:?} (difference {difference:?})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Input {input_index} has no gradient after the backward pass")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index} (loss+ {loss_plus:?}, loss- {loss_minus:?})")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}, element {element_index}: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Invalid gradient check argument: {0}")]
    InvalidArgument(String),
    #[error("Graph error during gradient check: {0}")]
    GraphError(#[from] SpindleError),
}

/// [`check_grad_with`] using the default graph configuration.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, SpindleError>,
{
    check_grad_with(GraphConfig::default(), func, inputs, epsilon, tolerance)
}

/// Compares the gradients computed by `backward` with central finite
/// differences.
///
/// `func` builds a computation over one gradient-tracking leaf per input.
/// The scalar being differentiated is the sum of the output's elements, so
/// the backward seed is all ones. An element passes when
/// `|analytical - numerical| <= tolerance * max(1, |analytical|, |numerical|)`.
pub fn check_grad_with<F>(
    config: GraphConfig,
    func: F,
    inputs: &[Tensor],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, SpindleError>,
{
    if !(epsilon > 0.0) || !(tolerance > 0.0) {
        return Err(GradCheckError::InvalidArgument(format!(
            "epsilon ({}) and tolerance ({}) must be positive",
            epsilon, tolerance
        )));
    }

    // --- Analytical pass ---
    let mut graph = Graph::with_config(config);
    let ids = inputs
        .iter()
        .map(|t| graph.new_leaf(t.clone(), true))
        .collect::<Result<Vec<_>, _>>()?;
    let output = func(&mut graph, &ids)?;
    graph.backward(output, None)?;
    let analytical = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            graph
                .gradient(*id)
                .map(|g| g.to_vec())
                .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // --- Numerical pass ---
    for (i, input) in inputs.iter().enumerate() {
        for elem in 0..input.numel() {
            let loss_plus = perturbed_loss(config, &func, inputs, i, elem, epsilon)?;
            let loss_minus = perturbed_loss(config, &func, inputs, i, elem, -epsilon)?;
            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
            let analytical_grad = analytical[i][elem];

            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem,
                    loss_plus,
                    loss_minus,
                });
            }
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem,
                    value: analytical_grad,
                });
            }

            let difference = (analytical_grad - numerical).abs();
            let scale = analytical_grad.abs().max(numerical.abs()).max(1.0);
            if difference > tolerance * scale {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem,
                    analytical_grad,
                    numerical_grad: numerical,
                    difference,
                });
            }
        }
    }
    Ok(())
}

fn perturbed_loss<F>(
    config: GraphConfig,
    func: &F,
    inputs: &[Tensor],
    input_index: usize,
    element_index: usize,
    delta: f64,
) -> Result<f64, GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, SpindleError>,
{
    let mut graph = Graph::with_config(config);
    let mut ids = Vec::with_capacity(inputs.len());
    for (i, input) in inputs.iter().enumerate() {
        let value = if i == input_index {
            let mut data = input.to_vec();
            data[element_index] += delta;
            Tensor::new(data, input.shape().to_vec())?
        } else {
            input.clone()
        };
        ids.push(graph.constant(value)?);
    }
    let output = func(&mut graph, &ids)?;
    Ok(graph.value(output)?.data().iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::OpKind;

    #[test]
    fn test_check_grad_accepts_correct_gradients() {
        let x = Tensor::vector(vec![0.5, -1.5, 2.0]);
        let y = Tensor::vector(vec![1.0, 3.0, -0.25]);
        let result = check_grad(
            |g, ids| {
                let p = g.apply(OpKind::Prod, &[ids[0], ids[1]])?;
                g.apply(OpKind::Tanh, &[p])
            },
            &[x, y],
            1e-6,
            1e-4,
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_check_grad_reports_unused_input() {
        let x = Tensor::vector(vec![1.0, 2.0]);
        let y = Tensor::vector(vec![3.0, 4.0]);
        let result = check_grad(|g, ids| g.apply(OpKind::Exp, &[ids[0]]), &[x, y], 1e-6, 1e-4);
        assert_eq!(
            result,
            Err(GradCheckError::MissingAnalyticalGrad { input_index: 1 })
        );
    }

    #[test]
    fn test_check_grad_rejects_bad_epsilon() {
        let x = Tensor::scalar(1.0);
        let result = check_grad(|g, ids| g.apply(OpKind::Exp, &[ids[0]]), &[x], 0.0, 1e-4);
        assert!(matches!(result, Err(GradCheckError::InvalidArgument(_))));
    }

    #[test]
    fn test_check_grad_propagates_graph_errors() {
        let x = Tensor::vector(vec![1.0, 2.0]);
        let y = Tensor::vector(vec![1.0, 2.0, 3.0]);
        let result =
            check_grad(|g, ids| g.apply(OpKind::Add, &[ids[0], ids[1]]), &[x, y], 1e-6, 1e-4);
        assert!(matches!(
            result,
            Err(GradCheckError::GraphError(SpindleError::ShapeMismatch { .. }))
        ));
    }
}
