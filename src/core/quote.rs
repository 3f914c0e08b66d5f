//! Market quotes
//!
//! Spot prices for the underlying and per-contract option quotes as returned
//! by a market-data provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::option::{OptionContract, OptionType};

/// Spot price quote for the underlying
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotQuote {
    pub symbol: String,
    pub price: f64,
    pub currency: Option<String>,
}

impl SpotQuote {
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            currency: None,
        }
    }

    /// A usable spot is finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.price.is_finite() && self.price > 0.0
    }
}

/// Option market quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// The option contract
    pub contract: OptionContract,
    /// Last traded price
    pub last: Option<f64>,
    /// Bid price
    pub bid: Option<f64>,
    /// Ask price
    pub ask: Option<f64>,
    /// Implied volatility in decimal form (0.25 = 25%)
    pub implied_vol: Option<f64>,
}

impl OptionQuote {
    pub fn new(contract: OptionContract) -> Self {
        Self {
            contract,
            last: None,
            bid: None,
            ask: None,
            implied_vol: None,
        }
    }

    pub fn strike(&self) -> f64 {
        self.contract.strike
    }

    pub fn symbol(&self) -> &str {
        &self.contract.symbol
    }
}

/// Chain of quotes for a single expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteChain {
    /// Underlying symbol
    pub underlying: String,
    /// Expiry date
    pub expiry: NaiveDate,
    /// Call quotes in provider order
    pub calls: Vec<OptionQuote>,
    /// Put quotes in provider order
    pub puts: Vec<OptionQuote>,
}

impl QuoteChain {
    pub fn new(underlying: impl Into<String>, expiry: NaiveDate) -> Self {
        Self {
            underlying: underlying.into(),
            expiry,
            calls: Vec::new(),
            puts: Vec::new(),
        }
    }

    /// Add a quote to the call or put side according to its contract type
    pub fn add(&mut self, quote: OptionQuote) {
        match quote.contract.option_type {
            OptionType::Call => self.calls.push(quote),
            OptionType::Put => self.puts.push(quote),
        }
    }
}
