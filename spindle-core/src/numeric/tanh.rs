use super::Numeric;
use num_traits::NumCast;
use crate::error::SpindleError;

/// Fidelity of the hyperbolic tangent used by the operator set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TanhApprox {
    /// `Float::tanh`.
    #[default]
    Exact,
    /// Lambert continued-fraction approximation (7th order rational).
    VarietyOfSound,
    /// Piecewise quadratic from Anguita et al., "Speed Improvement of the
    /// Back-Propagation on Current Generation Workstations" (1993).
    Anguita,
}

impl TanhApprox {
    /// Maps a math optimization level to an approximation: 0 exact,
    /// 1 continued fraction, 2 piecewise quadratic.
    pub fn from_level(level: u8) -> Result<Self, SpindleError> {
        match level {
            0 => Ok(TanhApprox::Exact),
            1 => Ok(TanhApprox::VarietyOfSound),
            2 => Ok(TanhApprox::Anguita),
            other => Err(SpindleError::ConfigurationError(format!(
                "math optimization level must be 0, 1 or 2, got {}",
                other
            ))),
        }
    }

    pub fn level(self) -> u8 {
        match self {
            TanhApprox::Exact => 0,
            TanhApprox::VarietyOfSound => 1,
            TanhApprox::Anguita => 2,
        }
    }
}

/// Hyperbolic tangent of `x` at the requested fidelity.
pub fn tanh<T: Numeric>(x: T, approx: TanhApprox) -> T {
    match approx {
        TanhApprox::Exact => x.tanh(),
        TanhApprox::VarietyOfSound => tanh_variety_of_sound(x),
        TanhApprox::Anguita => tanh_anguita(x),
    }
}

fn c<T: Numeric>(v: f64) -> T {
    // f32 and f64 both represent every constant below.
    <T as NumCast>::from(v).unwrap_or_else(T::nan)
}

fn tanh_anguita<T: Numeric>(x: T) -> T {
    let knee: T = c(1.92033);
    let sat: T = c(0.96016);
    let k: T = c(0.26037);
    if x > knee {
        sat
    } else if x > T::zero() {
        sat - k * (x - knee) * (x - knee)
    } else if x <= -knee {
        -sat
    } else {
        k * (x + knee) * (x + knee) - sat
    }
}

fn tanh_variety_of_sound<T: Numeric>(x: T) -> T {
    let x2 = x * x;
    let a = x * (c::<T>(135135.0) + x2 * (c::<T>(17325.0) + x2 * (c::<T>(378.0) + x2)));
    let b = c::<T>(135135.0) + x2 * (c::<T>(62370.0) + x2 * (c::<T>(3150.0) + x2 * c::<T>(28.0)));
    a / b
}
