use crate::autograd::node::{Node, NodeId, NodeKind};
use crate::config::GraphConfig;
use crate::error::SpindleError;
use crate::nn::Parameter;
use crate::ops::{BackwardCtx, OpKind};
use crate::tensor::{ones_like, Tensor};
use log::{debug, trace};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

fn next_graph_id() -> u64 {
    NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed)
}

/// An append-only arena of nodes recording one computation.
///
/// Nodes are stored in insertion order and operands always point at earlier
/// nodes, so the arena is a topological order by construction and `backward`
/// just walks it in reverse. Forward values are computed eagerly by
/// [`apply`](Graph::apply).
///
/// A graph is owned by one thread at a time. Several threads may each build
/// their own graph over the same [`Parameter`]s; the graph keeps a snapshot of
/// each parameter value taken when the parameter was wrapped.
#[derive(Debug)]
pub struct Graph {
    id: u64,
    config: GraphConfig,
    nodes: Vec<Node>,
    params: Vec<(Parameter, NodeId)>,
}

impl Default for Graph {
    fn default() -> Self {
        Graph::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Graph {
            id: next_graph_id(),
            config,
            nodes: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Registers `value` as a leaf.
    ///
    /// # Errors
    /// `EmptyTensor` if `value` holds no element.
    pub fn new_leaf(
        &mut self,
        value: Tensor,
        requires_grad: bool,
    ) -> Result<NodeId, SpindleError> {
        self.push_leaf(value, requires_grad, NodeKind::Input)
    }

    /// A leaf that never receives a gradient.
    pub fn constant(&mut self, value: Tensor) -> Result<NodeId, SpindleError> {
        self.push_leaf(value, false, NodeKind::Input)
    }

    /// Wraps a parameter as a gradient-tracking leaf.
    ///
    /// The parameter's current value is snapshotted. Wrapping the same
    /// parameter twice returns the node created the first time.
    pub fn param(&mut self, parameter: &Parameter) -> Result<NodeId, SpindleError> {
        if let Some((_, id)) = self.params.iter().find(|(p, _)| p.id() == parameter.id()) {
            return Ok(*id);
        }
        let id = self.push_leaf(parameter.value(), true, NodeKind::Parameter)?;
        self.params.push((parameter.clone(), id));
        Ok(id)
    }

    fn push_leaf(
        &mut self,
        value: Tensor,
        requires_grad: bool,
        kind: NodeKind,
    ) -> Result<NodeId, SpindleError> {
        if value.is_empty() {
            return Err(SpindleError::EmptyTensor);
        }
        let id = self.next_id();
        trace!("graph {}: leaf {} {:?} shape {:?}", self.id, id, kind, value.shape());
        self.nodes.push(Node::leaf(value, requires_grad, kind));
        Ok(id)
    }

    fn next_id(&self) -> NodeId {
        NodeId {
            graph: self.id,
            index: self.nodes.len(),
        }
    }

    /// Records `op` applied to `operands` and computes its value.
    ///
    /// On error the graph is left exactly as it was.
    pub fn apply(&mut self, op: OpKind, operands: &[NodeId]) -> Result<NodeId, SpindleError> {
        let spec = op.spec();
        spec.arity.check(spec.name, operands.len())?;

        let mut values = Vec::with_capacity(operands.len());
        let mut requires_grad = false;
        for &operand in operands {
            let node = self.node(operand)?;
            let value = node
                .value
                .as_ref()
                .ok_or(SpindleError::NodeReleased { index: operand.index })?;
            requires_grad |= node.requires_grad;
            values.push(value);
        }

        let shapes: Vec<&[usize]> = values.iter().map(|v| v.shape()).collect();
        let out_shape = (spec.shape)(spec.name, &shapes)?;
        let value = (spec.forward)(&values, &self.config.math)?;
        if value.shape() != out_shape.as_slice() {
            return Err(SpindleError::ShapeMismatch {
                expected: out_shape,
                actual: value.shape().to_vec(),
                operation: format!("{} (forward)", spec.name),
            });
        }

        let id = self.next_id();
        trace!(
            "graph {}: {} = {}({:?}) shape {:?}",
            self.id,
            id,
            spec.name,
            operands.iter().map(|o| o.index).collect::<Vec<_>>(),
            value.shape()
        );
        self.nodes
            .push(Node::derived(value, op, operands.to_vec(), requires_grad));
        Ok(id)
    }

    /// Like [`apply`](Graph::apply), resolving the operator by registered name.
    pub fn apply_named(
        &mut self,
        name: &str,
        operands: &[NodeId],
    ) -> Result<NodeId, SpindleError> {
        let op = OpKind::from_name(name)?;
        self.apply(op, operands)
    }

    fn index_of(&self, id: NodeId) -> Result<usize, SpindleError> {
        if id.graph != self.id {
            return Err(SpindleError::ForeignNode);
        }
        if id.index >= self.nodes.len() {
            return Err(SpindleError::InvalidNode {
                index: id.index,
                len: self.nodes.len(),
            });
        }
        Ok(id.index)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, SpindleError> {
        let index = self.index_of(id)?;
        Ok(&self.nodes[index])
    }

    /// The forward value of `id`.
    pub fn value(&self, id: NodeId) -> Result<&Tensor, SpindleError> {
        self.node(id)?
            .value
            .as_ref()
            .ok_or(SpindleError::NodeReleased { index: id.index })
    }

    /// The gradient accumulated into `id`, `None` if no backward pass reached
    /// it since the last reset (or the id is not valid for this graph).
    pub fn gradient(&self, id: NodeId) -> Option<&Tensor> {
        self.node(id).ok().and_then(|node| node.grad.as_ref())
    }

    /// Propagates gradients from `output` back to every node it depends on.
    ///
    /// `seed` defaults to ones shaped like the output. Contributions are added
    /// into each node's accumulator, so calling `backward` twice without
    /// [`zero_gradients`](Graph::zero_gradients) sums both passes. Nodes
    /// created after `output` are never touched.
    pub fn backward(&mut self, output: NodeId, seed: Option<Tensor>) -> Result<(), SpindleError> {
        let start = self.index_of(output)?;
        let out_node = &self.nodes[start];
        let out_value = out_node
            .value
            .as_ref()
            .ok_or(SpindleError::NodeReleased { index: start })?;
        if !out_node.requires_grad {
            debug!(
                "graph {}: backward from {} skipped, output does not require grad",
                self.id, output
            );
            return Ok(());
        }
        let seed = match seed {
            Some(seed) if seed.shape() != out_value.shape() => {
                return Err(SpindleError::ShapeMismatch {
                    expected: out_value.shape().to_vec(),
                    actual: seed.shape().to_vec(),
                    operation: "backward (seed)".to_string(),
                });
            }
            Some(seed) => seed,
            None => ones_like(out_value),
        };

        debug!("graph {}: backward from {} over {} node(s)", self.id, output, start + 1);
        let mut pending: Vec<Option<Tensor>> = vec![None; start + 1];
        pending[start] = Some(seed);
        let mut outstanding = 1usize;
        // Pass gradients per visited node, committed only once the pass succeeded.
        let mut reached: Vec<(usize, Tensor)> = Vec::new();

        for index in (0..=start).rev() {
            let grad = match pending[index].take() {
                Some(grad) => grad,
                None => continue,
            };
            outstanding -= 1;

            if let Some(op) = self.nodes[index].op {
                let contributions = self.run_backward(index, op, &grad)?;
                let operands = &self.nodes[index].operands;
                for (operand, contribution) in operands.iter().zip(contributions) {
                    let target = &self.nodes[operand.index];
                    if !target.requires_grad {
                        continue;
                    }
                    if let Some(value) = target.value.as_ref() {
                        if value.shape() != contribution.shape() {
                            return Err(SpindleError::BackwardError(format!(
                                "{} produced a gradient of shape {:?} for operand {} of shape {:?}",
                                op,
                                contribution.shape(),
                                operand,
                                value.shape()
                            )));
                        }
                    }
                    let slot = &mut pending[operand.index];
                    *slot = Some(match slot.take() {
                        Some(existing) => existing.add(&contribution)?,
                        None => {
                            outstanding += 1;
                            contribution
                        }
                    });
                }
            }
            reached.push((index, grad));

            if outstanding == 0 {
                break;
            }
        }

        let accumulated = reached
            .into_iter()
            .map(|(index, grad)| match &self.nodes[index].grad {
                Some(acc) => acc.add(&grad).map(|sum| (index, sum)),
                None => Ok((index, grad)),
            })
            .collect::<Result<Vec<_>, SpindleError>>()?;

        let visited = accumulated.len();
        let mut released = 0usize;
        for (index, grad) in accumulated {
            let node = &mut self.nodes[index];
            node.grad = Some(grad);
            if self.config.release_after_backward && node.release() {
                released += 1;
            }
        }

        debug!(
            "graph {}: backward done, {} node(s) visited, {} released",
            self.id, visited, released
        );
        Ok(())
    }

    fn run_backward(
        &self,
        index: usize,
        op: OpKind,
        grad: &Tensor,
    ) -> Result<Vec<Tensor>, SpindleError> {
        let node = &self.nodes[index];
        let output = node
            .value
            .as_ref()
            .ok_or(SpindleError::NodeReleased { index })?;
        let operands = node
            .operands
            .iter()
            .map(|id| {
                self.nodes[id.index]
                    .value
                    .as_ref()
                    .ok_or(SpindleError::NodeReleased { index: id.index })
            })
            .collect::<Result<Vec<&Tensor>, SpindleError>>()?;
        let ctx = BackwardCtx {
            operands: &operands,
            output,
            grad,
            math: &self.config.math,
        };
        let contributions = (op.spec().backward)(&ctx)?;
        if contributions.len() != operands.len() {
            return Err(SpindleError::BackwardError(format!(
                "{} returned {} gradient(s) for {} operand(s)",
                op,
                contributions.len(),
                operands.len()
            )));
        }
        Ok(contributions)
    }

    /// Clears every gradient accumulator.
    pub fn zero_gradients(&mut self) {
        for node in &mut self.nodes {
            node.grad = None;
        }
    }

    /// Drops values, operand links and gradients of all derived nodes and
    /// returns how many were released. Leaves are kept.
    pub fn release_intermediates(&mut self) -> usize {
        let mut released = 0;
        for node in &mut self.nodes {
            if node.release() {
                released += 1;
            }
        }
        debug!("graph {}: released {} intermediate node(s)", self.id, released);
        released
    }

    /// Empties the graph for the next batch. Ids issued before the call are
    /// rejected afterwards with `ForeignNode`.
    pub fn clear(&mut self) {
        debug!("graph {}: cleared {} node(s)", self.id, self.nodes.len());
        self.nodes.clear();
        self.params.clear();
        self.id = next_graph_id();
    }

    /// Parameters wrapped in this graph, in wrapping order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> + '_ {
        self.params.iter().map(|(p, _)| p)
    }

    /// `(parameter, gradient)` for every wrapped parameter that received one.
    pub fn param_gradients(&self) -> impl Iterator<Item = (&Parameter, &Tensor)> + '_ {
        self.params
            .iter()
            .filter_map(|(p, id)| self.nodes[id.index].grad.as_ref().map(|g| (p, g)))
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
