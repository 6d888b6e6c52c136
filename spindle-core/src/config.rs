//! Configuration values threaded into graphs and kernels.

use crate::numeric::TanhApprox;

/// Numeric precision settings honored by the operator set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MathConfig {
    pub tanh: TanhApprox,
}

impl MathConfig {
    pub fn with_tanh(mut self, tanh: TanhApprox) -> Self {
        self.tanh = tanh;
        self
    }
}

/// Per-graph settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphConfig {
    /// Precision used by the forward and backward rules of this graph.
    pub math: MathConfig,
    /// When set, `backward` drops each derived node's value, operands and
    /// gradient as soon as its backward rule has run. A released graph cannot
    /// be differentiated a second time.
    pub release_after_backward: bool,
}

impl GraphConfig {
    pub fn with_math(mut self, math: MathConfig) -> Self {
        self.math = math;
        self
    }

    pub fn with_release_after_backward(mut self, release: bool) -> Self {
        self.release_after_backward = release;
        self
    }
}
