//! Offline market-data snapshots
//!
//! A snapshot is a JSON document holding everything a screening run asks
//! for: the spot price, the listed expirations and one or more chains.
//!
//! ```json
//! {
//!   "symbol": "COST",
//!   "price": 912.34,
//!   "expirations": ["2026-11-13", "2026-11-20"],
//!   "chains": [
//!     {
//!       "expiry": "2026-11-20",
//!       "calls": [{"contract_symbol": "COST261120C00865000", "strike": 865.0,
//!                  "last": 58.1, "bid": 57.5, "ask": 59.0, "implied_vol": 0.24}],
//!       "puts": []
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::provider::MarketDataProvider;
use crate::core::{OptionContract, OptionQuote, QuoteChain, ScreenError, ScreenResult, SpotQuote};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub symbol: String,
    pub price: Option<f64>,
    #[serde(default)]
    pub expirations: Vec<NaiveDate>,
    #[serde(default)]
    pub chains: Vec<SnapshotChain>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotChain {
    pub expiry: NaiveDate,
    #[serde(default)]
    pub calls: Vec<SnapshotRow>,
    #[serde(default)]
    pub puts: Vec<SnapshotRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub contract_symbol: String,
    pub strike: f64,
    pub last: Option<f64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub implied_vol: Option<f64>,
}

impl SnapshotRow {
    fn to_quote(&self, contract: OptionContract) -> OptionQuote {
        let mut quote = OptionQuote::new(contract);
        quote.last = self.last;
        quote.bid = self.bid;
        quote.ask = self.ask;
        quote.implied_vol = self.implied_vol;
        quote
    }
}

/// Provider backed by an in-memory snapshot
pub struct SnapshotProvider {
    snapshot: Snapshot,
}

impl SnapshotProvider {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ScreenResult<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let snapshot: Snapshot = serde_json::from_str(&json)?;

        tracing::info!(
            "Loaded {} snapshot from {:?} ({} chains)",
            snapshot.symbol,
            path.as_ref(),
            snapshot.chains.len()
        );
        Ok(Self::new(snapshot))
    }

    fn check_symbol(&self, symbol: &str) -> ScreenResult<()> {
        if self.snapshot.symbol.eq_ignore_ascii_case(symbol) {
            Ok(())
        } else {
            Err(ScreenError::data_source(format!(
                "Snapshot holds {}, not {}",
                self.snapshot.symbol, symbol
            )))
        }
    }
}

impl MarketDataProvider for SnapshotProvider {
    fn latest_price(&self, symbol: &str) -> ScreenResult<SpotQuote> {
        self.check_symbol(symbol)?;

        let price = self
            .snapshot
            .price
            .ok_or_else(|| ScreenError::data_unavailable(format!("No price data for {}", symbol)))?;

        let quote = SpotQuote::new(symbol, price);
        if !quote.is_valid() {
            return Err(ScreenError::data_unavailable(format!(
                "Invalid price {} for {}",
                price, symbol
            )));
        }
        Ok(quote)
    }

    fn expirations(&self, symbol: &str) -> ScreenResult<Vec<NaiveDate>> {
        self.check_symbol(symbol)?;
        Ok(self.snapshot.expirations.clone())
    }

    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> ScreenResult<QuoteChain> {
        self.check_symbol(symbol)?;

        let data = self
            .snapshot
            .chains
            .iter()
            .find(|c| c.expiry == expiry)
            .ok_or_else(|| {
                ScreenError::data_unavailable(format!("No chain for {} {}", symbol, expiry))
            })?;

        let mut chain = QuoteChain::new(symbol, expiry);
        for row in &data.calls {
            let contract =
                OptionContract::call(symbol, row.contract_symbol.as_str(), row.strike, expiry);
            chain.add(row.to_quote(contract));
        }
        for row in &data.puts {
            let contract =
                OptionContract::put(symbol, row.contract_symbol.as_str(), row.strike, expiry);
            chain.add(row.to_quote(contract));
        }

        Ok(chain)
    }
}
