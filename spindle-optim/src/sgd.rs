// spindle-optim/src/sgd.rs

use crate::{check_grad_shape, check_learning_rate, Optimizer};
use log::debug;
use spindle_core::{Parameter, SpindleError, Tensor};
use std::collections::HashMap;

/// Hyperparameters of [`Sgd`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdConfig {
    pub lr: f64,
    /// Momentum factor in `[0, 1)`; `0` disables the velocity buffer.
    pub momentum: f64,
}

impl Default for SgdConfig {
    fn default() -> Self {
        SgdConfig { lr: 0.01, momentum: 0.0 }
    }
}

impl SgdConfig {
    pub fn with_lr(mut self, lr: f64) -> Self {
        self.lr = lr;
        self
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }
}

/// Implements stochastic gradient descent (optionally with momentum).
///
/// Updates parameters `p` according to the rule:
/// `v = momentum * v + grad(p)`, `p = p - lr * v`
#[derive(Debug)]
pub struct Sgd {
    config: SgdConfig,
    velocity: HashMap<u64, Vec<f64>>,
}

impl Sgd {
    pub fn new(config: SgdConfig) -> Result<Self, SpindleError> {
        check_learning_rate(config.lr)?;
        if !(0.0..1.0).contains(&config.momentum) {
            return Err(SpindleError::ConfigurationError(format!(
                "momentum must be in [0, 1), got {}",
                config.momentum
            )));
        }
        Ok(Sgd {
            config,
            velocity: HashMap::new(),
        })
    }

    pub fn config(&self) -> &SgdConfig {
        &self.config
    }
}

impl Optimizer for Sgd {
    fn step<'a, I>(&mut self, grads: I) -> Result<(), SpindleError>
    where
        I: IntoIterator<Item = (&'a Parameter, &'a Tensor)>,
    {
        let SgdConfig { lr, momentum } = self.config;
        let mut updated = 0usize;
        for (param, grad) in grads {
            check_grad_shape(param, grad)?;
            let direction: Vec<f64> = if momentum > 0.0 {
                let v = self
                    .velocity
                    .entry(param.id())
                    .or_insert_with(|| vec![0.0; grad.numel()]);
                for (v, g) in v.iter_mut().zip(grad.data()) {
                    *v = momentum * *v + g;
                }
                v.clone()
            } else {
                grad.to_vec()
            };
            param.update(|value| {
                let data = value.data().iter().zip(&direction).map(|(p, d)| p - lr * d).collect();
                Tensor::new(data, value.shape().to_vec())
            })?;
            updated += 1;
        }
        debug!("sgd step: {} parameter(s) updated", updated);
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.config.lr
    }

    fn set_learning_rate(&mut self, lr: f64) -> Result<(), SpindleError> {
        check_learning_rate(lr)?;
        self.config.lr = lr;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn param(name: &str, data: Vec<f64>) -> Parameter {
        Parameter::new(name, Tensor::vector(data)).unwrap()
    }

    #[test]
    fn test_sgd_step() {
        let p1 = param("p1", vec![1.0, 2.0]);
        let p2 = param("p2", vec![3.0, 4.0]);
        let g1 = Tensor::vector(vec![10.0, -20.0]);
        let g2 = Tensor::vector(vec![0.5, -0.5]);
        let mut optim = Sgd::new(SgdConfig::default().with_lr(0.1)).unwrap();
        optim.step(vec![(&p1, &g1), (&p2, &g2)]).unwrap();

        let v1 = p1.value().to_vec();
        assert_relative_eq!(v1[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(v1[1], 4.0, epsilon = 1e-12);
        let v2 = p2.value().to_vec();
        assert_relative_eq!(v2[0], 2.95, epsilon = 1e-12);
        assert_relative_eq!(v2[1], 4.05, epsilon = 1e-12);
    }

    #[test]
    fn test_sgd_momentum_accumulates_velocity() {
        let p = param("p", vec![0.0]);
        let g = Tensor::vector(vec![1.0]);
        let mut optim = Sgd::new(SgdConfig::default().with_lr(1.0).with_momentum(0.5)).unwrap();
        optim.step([(&p, &g)]).unwrap();
        assert_relative_eq!(p.value().to_vec()[0], -1.0);
        // v = 0.5 * 1 + 1 = 1.5
        optim.step([(&p, &g)]).unwrap();
        assert_relative_eq!(p.value().to_vec()[0], -2.5);
    }

    #[test]
    fn test_sgd_rejects_bad_config() {
        assert!(matches!(
            Sgd::new(SgdConfig::default().with_lr(0.0)),
            Err(SpindleError::ConfigurationError(_))
        ));
        assert!(matches!(
            Sgd::new(SgdConfig::default().with_momentum(1.0)),
            Err(SpindleError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_sgd_shape_mismatch() {
        let p = param("p", vec![1.0, 2.0]);
        let g = Tensor::vector(vec![1.0]);
        let mut optim = Sgd::new(SgdConfig::default()).unwrap();
        assert!(matches!(optim.step([(&p, &g)]), Err(SpindleError::ShapeMismatch { .. })));
        assert_eq!(p.value().to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_set_learning_rate() {
        let mut optim = Sgd::new(SgdConfig::default()).unwrap();
        optim.set_learning_rate(0.5).unwrap();
        assert_eq!(optim.learning_rate(), 0.5);
        assert!(optim.set_learning_rate(f64::NAN).is_err());
    }
}
