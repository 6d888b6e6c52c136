//! # Random Source
//!
//! A seeded pseudo-random stream shared by every component that needs
//! randomness (parameter initialization, dropout masks, shuffling).
//!
//! All draws are serialized through a single mutex so that the sequence of
//! values depends only on the seed and the logical order of draws, never on
//! which thread issues them.

use crate::error::SpindleError;
use log::warn;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::Normal;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock-serialized pseudo-random generator.
///
/// `Source` is `Send + Sync` and meant to be shared (by reference or inside an
/// `Arc`) between the threads that build graphs concurrently.
#[derive(Debug)]
pub struct Source {
    seed: u64,
    rng: Mutex<StdRng>,
}

impl Source {
    /// Creates a source whose whole draw sequence is determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Source {
            seed,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// The seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn lock(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            // The generator state is valid after any partial draw.
            warn!("Random source mutex was poisoned. Recovering.");
            poisoned.into_inner()
        })
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&self) -> u64 {
        self.lock().next_u64()
    }

    /// Uniform sample in `[lo, hi)`.
    pub fn uniform(&self, lo: f64, hi: f64) -> Result<f64, SpindleError> {
        check_uniform_range(lo, hi)?;
        Ok(self.lock().gen_range(lo..hi))
    }

    /// Normal sample with the given mean and standard deviation.
    pub fn normal(&self, mean: f64, std_dev: f64) -> Result<f64, SpindleError> {
        let dist = normal_dist(mean, std_dev)?;
        Ok(dist.sample(&mut *self.lock()))
    }

    /// `true` with probability `p`.
    pub fn bernoulli(&self, p: f64) -> Result<bool, SpindleError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(SpindleError::InvalidArgument(format!(
                "bernoulli probability must be in [0, 1], got {}",
                p
            )));
        }
        Ok(self.lock().gen_bool(p))
    }

    /// Fills `out` with uniform samples in `[lo, hi)` under a single lock
    /// acquisition, so the block is contiguous in the draw order.
    pub fn fill_uniform(&self, out: &mut [f64], lo: f64, hi: f64) -> Result<(), SpindleError> {
        check_uniform_range(lo, hi)?;
        let dist = Uniform::new(lo, hi);
        let mut rng = self.lock();
        out.iter_mut().for_each(|v| *v = dist.sample(&mut *rng));
        Ok(())
    }

    /// Fills `out` with normal samples under a single lock acquisition.
    pub fn fill_normal(
        &self,
        out: &mut [f64],
        mean: f64,
        std_dev: f64,
    ) -> Result<(), SpindleError> {
        let dist = normal_dist(mean, std_dev)?;
        let mut rng = self.lock();
        out.iter_mut().for_each(|v| *v = dist.sample(&mut *rng));
        Ok(())
    }

    /// Shuffles `items` in place.
    pub fn shuffle<T>(&self, items: &mut [T]) {
        items.shuffle(&mut *self.lock());
    }

    /// A random permutation of `0..n`.
    pub fn permutation(&self, n: usize) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..n).collect();
        self.shuffle(&mut perm);
        perm
    }

    /// Derives an independent source seeded from the next value of this one.
    ///
    /// Forking is itself a draw, so the branch is reproducible from the
    /// parent's seed and the draw order.
    pub fn fork(&self) -> Source {
        Source::new(self.next_u64())
    }
}

/// `lo < hi`, both finite, and a width that does not overflow.
fn check_uniform_range(lo: f64, hi: f64) -> Result<(), SpindleError> {
    if !(lo < hi && lo.is_finite() && hi.is_finite() && (hi - lo).is_finite()) {
        return Err(SpindleError::InvalidArgument(format!(
            "uniform range must be finite with lo < hi, got [{}, {})",
            lo, hi
        )));
    }
    Ok(())
}

fn normal_dist(mean: f64, std_dev: f64) -> Result<Normal<f64>, SpindleError> {
    // rand_distr accepts a negative std_dev and mirrors it.
    if !(mean.is_finite() && std_dev.is_finite() && std_dev >= 0.0) {
        return Err(SpindleError::InvalidArgument(format!(
            "normal distribution needs a finite mean and std >= 0, got mean {}, std {}",
            mean, std_dev
        )));
    }
    Normal::new(mean, std_dev).map_err(|e| {
        SpindleError::InvalidArgument(format!(
            "invalid normal distribution (mean {}, std {}): {}",
            mean, std_dev, e
        ))
    })
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
