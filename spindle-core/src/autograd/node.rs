use crate::ops::OpKind;
use crate::tensor::Tensor;
use std::fmt;

/// Handle to a node of one specific [`Graph`](super::Graph).
///
/// A `NodeId` is a plain index into the graph's arena plus the identity of
/// the graph generation that issued it, so handles from another graph (or
/// from before a `clear`) are rejected instead of silently aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) graph: u64,
    pub(crate) index: usize,
}

impl NodeId {
    /// Position of the node in insertion order.
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Provenance of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Leaf wrapping a model parameter; never reclaimed by the graph.
    Parameter,
    /// Leaf wrapping input data or a constant.
    Input,
    /// Result of an operator application.
    Derived,
}

/// A vertex of the computation graph.
#[derive(Debug)]
pub struct Node {
    pub(crate) value: Option<Tensor>,
    pub(crate) grad: Option<Tensor>,
    pub(crate) op: Option<OpKind>,
    pub(crate) operands: Vec<NodeId>,
    pub(crate) requires_grad: bool,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn leaf(value: Tensor, requires_grad: bool, kind: NodeKind) -> Self {
        Node {
            value: Some(value),
            grad: None,
            op: None,
            operands: Vec::new(),
            requires_grad,
            kind,
        }
    }

    pub(crate) fn derived(
        value: Tensor,
        op: OpKind,
        operands: Vec<NodeId>,
        requires_grad: bool,
    ) -> Self {
        Node {
            value: Some(value),
            grad: None,
            op: Some(op),
            operands,
            requires_grad,
            kind: NodeKind::Derived,
        }
    }

    /// Forward value, `None` once released.
    pub fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    /// Accumulated gradient, if a backward pass reached this node.
    pub fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    /// Producing operator, `None` for leaves.
    pub fn op(&self) -> Option<OpKind> {
        self.op
    }

    pub fn operands(&self) -> &[NodeId] {
        &self.operands
    }

    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_leaf(&self) -> bool {
        self.op.is_none()
    }

    pub fn is_released(&self) -> bool {
        self.value.is_none()
    }

    /// Drops value, gradient and operand links. Leaves are never released.
    pub(crate) fn release(&mut self) -> bool {
        if self.is_leaf() || self.is_released() {
            return false;
        }
        self.value = None;
        self.grad = None;
        self.operands = Vec::new();
        true
    }
}
