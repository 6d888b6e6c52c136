use crate::error::SpindleError;
use crate::tensor::Tensor;
use log::warn;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

static NEXT_PARAMETER_ID: AtomicU64 = AtomicU64::new(1);

struct ParameterInner {
    id: u64,
    name: String,
    value: RwLock<Tensor>,
}

/// A learnable value shared between graphs and an optimizer.
///
/// Cloning a `Parameter` yields another handle to the same value. Graphs read
/// a snapshot through [`value`](Parameter::value) when they wrap it;
/// optimizers write through [`set_value`](Parameter::set_value) or
/// [`update`](Parameter::update) between steps.
#[derive(Clone)]
pub struct Parameter(Arc<ParameterInner>);

impl Parameter {
    /// Creates a named parameter.
    ///
    /// # Errors
    /// `EmptyTensor` if `value` holds no element.
    pub fn new(name: impl Into<String>, value: Tensor) -> Result<Self, SpindleError> {
        if value.is_empty() {
            return Err(SpindleError::EmptyTensor);
        }
        Ok(Parameter(Arc::new(ParameterInner {
            id: NEXT_PARAMETER_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            value: RwLock::new(value),
        })))
    }

    /// Process-unique identifier, stable across clones.
    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    fn read(&self) -> RwLockReadGuard<'_, Tensor> {
        self.0.value.read().unwrap_or_else(|poisoned| {
            warn!("Parameter '{}' lock poisoned on read. Recovering.", self.0.name);
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tensor> {
        self.0.value.write().unwrap_or_else(|poisoned| {
            warn!("Parameter '{}' lock poisoned on write. Recovering.", self.0.name);
            poisoned.into_inner()
        })
    }

    /// Current value. Cheap: the element buffer is shared, not copied.
    pub fn value(&self) -> Tensor {
        self.read().clone()
    }

    pub fn shape(&self) -> Vec<usize> {
        self.read().shape().to_vec()
    }

    /// Replaces the value. The shape must not change.
    pub fn set_value(&self, value: Tensor) -> Result<(), SpindleError> {
        let mut guard = self.write();
        if guard.shape() != value.shape() {
            return Err(SpindleError::ShapeMismatch {
                expected: guard.shape().to_vec(),
                actual: value.shape().to_vec(),
                operation: format!("set_value ({})", self.0.name),
            });
        }
        *guard = value;
        Ok(())
    }

    /// Replaces the value with `f(current)` under a single write lock.
    pub fn update<F>(&self, f: F) -> Result<(), SpindleError>
    where
        F: FnOnce(&Tensor) -> Result<Tensor, SpindleError>,
    {
        let mut guard = self.write();
        let next = f(&guard)?;
        if next.shape() != guard.shape() {
            return Err(SpindleError::ShapeMismatch {
                expected: guard.shape().to_vec(),
                actual: next.shape().to_vec(),
                operation: format!("update ({})", self.0.name),
            });
        }
        *guard = next;
        Ok(())
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Parameter {}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .field("shape", &self.shape())
            .finish()
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
