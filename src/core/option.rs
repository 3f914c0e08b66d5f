//! Option contract definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

/// Option contract specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Underlying symbol (e.g., "COST")
    pub underlying: String,
    /// Contract symbol as listed by the provider (e.g., "COST261120C00870000")
    pub symbol: String,
    /// Strike price
    pub strike: f64,
    /// Expiration date
    pub expiry: NaiveDate,
    /// Option type (Call/Put)
    pub option_type: OptionType,
}

impl OptionContract {
    pub fn call(
        underlying: impl Into<String>,
        symbol: impl Into<String>,
        strike: f64,
        expiry: NaiveDate,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            symbol: symbol.into(),
            strike,
            expiry,
            option_type: OptionType::Call,
        }
    }

    pub fn put(
        underlying: impl Into<String>,
        symbol: impl Into<String>,
        strike: f64,
        expiry: NaiveDate,
    ) -> Self {
        Self {
            option_type: OptionType::Put,
            ..Self::call(underlying, symbol, strike, expiry)
        }
    }
}
