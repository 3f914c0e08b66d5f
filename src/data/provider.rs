//! Market-data provider abstraction
//!
//! The screener only needs three queries from a data source. Anything that
//! can answer them (a live HTTP API, a JSON snapshot, a test double) can
//! drive a screening run.

use chrono::NaiveDate;

use crate::core::{QuoteChain, ScreenResult, SpotQuote};

pub trait MarketDataProvider {
    /// Latest close price for the symbol
    fn latest_price(&self, symbol: &str) -> ScreenResult<SpotQuote>;

    /// Listed option expirations, in provider order
    fn expirations(&self, symbol: &str) -> ScreenResult<Vec<NaiveDate>>;

    /// Calls and puts for one expiration
    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> ScreenResult<QuoteChain>;
}
