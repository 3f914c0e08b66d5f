//! Screening configuration

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{ScreenError, ScreenResult};

/// Longest supported expiration horizon (ten years)
pub const MAX_WEEKS_TO_EXPIRY: u32 = 520;

/// Parameters for a single screening run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Strike target as a fraction of spot
    /// Default: 0.95 (5% below current price)
    pub strike_offset: f64,

    /// Half-width of the strike band in currency units
    /// Default: 2.0
    pub strike_tolerance: f64,

    /// Expiration horizon in weeks
    /// Default: 4
    pub weeks_to_expiry: u32,

    /// Annualized risk-free rate
    /// Default: 0.05
    pub risk_free_rate: f64,

    /// Day-count basis for time to expiry
    /// Default: 365.0
    pub days_per_year: f64,

    /// Use this expiration instead of the nearest to the horizon
    pub expiration: Option<NaiveDate>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            strike_offset: 0.95,
            strike_tolerance: 2.0,
            weeks_to_expiry: 4,
            risk_free_rate: 0.05,
            days_per_year: 365.0,
            expiration: None,
        }
    }
}

impl ScreenConfig {
    /// Load a configuration from a JSON file; absent fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> ScreenResult<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let config: ScreenConfig = serde_json::from_str(&json)?;
        config.validate()?;

        tracing::debug!("Loaded screen config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Horizon in days
    pub fn horizon_days(&self) -> i64 {
        i64::from(self.weeks_to_expiry) * 7
    }

    /// Years until expiry for a whole number of calendar days
    pub fn time_to_expiry(&self, days: i64) -> f64 {
        days as f64 / self.days_per_year
    }

    pub fn validate(&self) -> ScreenResult<()> {
        if !(self.strike_offset.is_finite() && self.strike_offset > 0.0) {
            return Err(ScreenError::invalid_input(format!(
                "strike offset must be positive, got {}",
                self.strike_offset
            )));
        }
        if !(self.strike_tolerance.is_finite() && self.strike_tolerance >= 0.0) {
            return Err(ScreenError::invalid_input(format!(
                "strike tolerance must be non-negative, got {}",
                self.strike_tolerance
            )));
        }
        if self.weeks_to_expiry > MAX_WEEKS_TO_EXPIRY {
            return Err(ScreenError::invalid_input(format!(
                "expiration horizon of {} weeks exceeds {} weeks",
                self.weeks_to_expiry, MAX_WEEKS_TO_EXPIRY
            )));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(ScreenError::invalid_input("risk-free rate must be finite"));
        }
        if !(self.days_per_year.is_finite() && self.days_per_year > 0.0) {
            return Err(ScreenError::invalid_input(format!(
                "days per year must be positive, got {}",
                self.days_per_year
            )));
        }
        Ok(())
    }
}
