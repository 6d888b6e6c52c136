use crate::{check_grad_shape, check_learning_rate, Optimizer};
use log::debug;
use spindle_core::{Parameter, SpindleError, Tensor};
use std::collections::HashMap;

/// Hyperparameters of [`Adam`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamConfig {
    pub lr: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        AdamConfig {
            lr: 0.001,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
        }
    }
}

impl AdamConfig {
    pub fn with_lr(mut self, lr: f64) -> Self {
        self.lr = lr;
        self
    }

    pub fn with_betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}

#[derive(Debug)]
struct AdamState {
    step: i32,
    m: Vec<f64>,
    v: Vec<f64>,
}

/// Implements the Adam optimization algorithm.
/// Reference: https://arxiv.org/abs/1412.6980
///
/// Moment estimates and the step count are kept per parameter, so a
/// parameter that receives no gradient in some step is not decayed.
#[derive(Debug)]
pub struct Adam {
    config: AdamConfig,
    state: HashMap<u64, AdamState>,
}

impl Adam {
    pub fn new(config: AdamConfig) -> Result<Self, SpindleError> {
        check_learning_rate(config.lr)?;
        for (name, beta) in [("beta1", config.beta1), ("beta2", config.beta2)] {
            if !(0.0..1.0).contains(&beta) {
                return Err(SpindleError::ConfigurationError(format!(
                    "{} must be in [0, 1), got {}",
                    name, beta
                )));
            }
        }
        if !(config.epsilon >= 0.0) {
            return Err(SpindleError::ConfigurationError(format!(
                "epsilon must be non-negative, got {}",
                config.epsilon
            )));
        }
        Ok(Adam {
            config,
            state: HashMap::new(),
        })
    }

    pub fn config(&self) -> &AdamConfig {
        &self.config
    }

    /// Number of updates applied to `param` so far.
    pub fn steps_taken(&self, param: &Parameter) -> usize {
        self.state.get(&param.id()).map_or(0, |s| s.step as usize)
    }
}

impl Optimizer for Adam {
    fn step<'a, I>(&mut self, grads: I) -> Result<(), SpindleError>
    where
        I: IntoIterator<Item = (&'a Parameter, &'a Tensor)>,
    {
        let AdamConfig {
            lr,
            beta1,
            beta2,
            epsilon,
        } = self.config;
        let mut updated = 0usize;

        for (param, grad) in grads {
            check_grad_shape(param, grad)?;
            let state = self.state.entry(param.id()).or_insert_with(|| AdamState {
                step: 0,
                m: vec![0.0; grad.numel()],
                v: vec![0.0; grad.numel()],
            });
            state.step = state.step.saturating_add(1);
            let bias_correction1 = 1.0 - beta1.powi(state.step);
            let bias_correction2 = 1.0 - beta2.powi(state.step);

            let mut delta = Vec::with_capacity(grad.numel());
            for ((m, v), &g) in state.m.iter_mut().zip(state.v.iter_mut()).zip(grad.data()) {
                *m = beta1 * *m + (1.0 - beta1) * g;
                *v = beta2 * *v + (1.0 - beta2) * g * g;
                let m_hat = *m / bias_correction1;
                let v_hat = *v / bias_correction2;
                delta.push(lr * m_hat / (v_hat.sqrt() + epsilon));
            }

            param.update(|value| {
                let data = value.data().iter().zip(&delta).map(|(p, d)| p - d).collect();
                Tensor::new(data, value.shape().to_vec())
            })?;
            updated += 1;
        }
        debug!("adam step: {} parameter(s) updated", updated);
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

    #[test]
    fn test_adam_default_config() {
        let c = AdamConfig::default();
        assert_eq!((c.lr, c.beta1, c.beta2, c.epsilon), (0.001, 0.9, 0.999, 1e-8));
    }

    #[test]
    fn test_adam_first_step_moves_by_lr() {
        // After bias correction the first update is lr * g / (|g| + eps).
        let p = Parameter::new("p", Tensor::vector(vec![1.0, -1.0])).unwrap();
        let g = Tensor::vector(vec![0.5, -4.0]);
        let mut optim = Adam::new(AdamConfig::default().with_lr(0.1)).unwrap();
        optim.step([(&p, &g)]).unwrap();
        let v = p.value().to_vec();
        assert_relative_eq!(v[0], 0.9, epsilon = 1e-6);
        assert_relative_eq!(v[1], -0.9, epsilon = 1e-6);
        assert_eq!(optim.steps_taken(&p), 1);
    }

    #[test]
    fn test_adam_state_is_per_parameter() {
        let a = Parameter::new("a", Tensor::scalar(0.0)).unwrap();
        let b = Parameter::new("b", Tensor::scalar(0.0)).unwrap();
        let g = Tensor::scalar(1.0);
        let mut optim = Adam::new(AdamConfig::default()).unwrap();
        optim.step([(&a, &g)]).unwrap();
        optim.step([(&a, &g), (&b, &g)]).unwrap();
        assert_eq!(optim.steps_taken(&a), 2);
        assert_eq!(optim.steps_taken(&b), 1);
    }

    #[test]
    fn test_adam_minimizes_quadratic() {
        // f(p) = p^2, gradient 2p.
        let p = Parameter::new("p", Tensor::scalar(3.0)).unwrap();
        let mut optim = Adam::new(AdamConfig::default().with_lr(0.1)).unwrap();
        for _ in 0..500 {
            let g = p.value().scale(2.0);
            optim.step([(&p, &g)]).unwrap();
        }
        assert!(p.value().item().unwrap().abs() < 0.05);
    }

    #[test]
    fn test_adam_rejects_bad_config() {
        assert!(Adam::new(AdamConfig::default().with_betas(1.0, 0.999)).is_err());
        assert!(Adam::new(AdamConfig::default().with_epsilon(-1.0)).is_err());
        assert!(Adam::new(AdamConfig::default().with_lr(-0.1)).is_err());
    }
}
