//! Black-Scholes call delta
//!
//! Closed-form delta of a European call on a non-dividend-paying underlying:
//!
//! ```text
//! d1    = (ln(S/K) + (r + σ²/2)·T) / (σ·√T)
//! delta = Φ(d1)
//! ```
//!
//! Inputs that would divide by zero (σ = 0 or T = 0) are rejected with
//! `InvalidOptionParameters` rather than producing NaN.

use std::f64::consts::SQRT_2;

use statrs::function::erf::erfc;

use crate::core::{ScreenError, ScreenResult};

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Black-Scholes d1 parameter
///
/// Unchecked: callers must ensure `vol > 0` and `time > 0`.
pub fn d1(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt())
}

/// Black-Scholes call delta, Φ(d1)
pub fn call_delta(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> ScreenResult<f64> {
    validate(spot, strike, time, rate, vol)?;
    Ok(norm_cdf(d1(spot, strike, rate, vol, time)))
}

fn validate(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> ScreenResult<()> {
    if !(spot.is_finite() && spot > 0.0) {
        return Err(ScreenError::invalid_params(format!("non-positive spot {}", spot)));
    }
    if !(strike.is_finite() && strike > 0.0) {
        return Err(ScreenError::invalid_params(format!("non-positive strike {}", strike)));
    }
    if !(time.is_finite() && time > 0.0) {
        return Err(ScreenError::invalid_params(format!(
            "non-positive time to expiry {}",
            time
        )));
    }
    if !(vol.is_finite() && vol > 0.0) {
        return Err(ScreenError::invalid_params(format!("non-positive volatility {}", vol)));
    }
    if !rate.is_finite() {
        return Err(ScreenError::invalid_params("non-finite risk-free rate"));
    }
    Ok(())
}
