//! Core data types for the delta screener
//!
//! Defines fundamental types:
//! - OptionContract: Symbol, strike, expiry, type (call/put)
//! - OptionQuote / QuoteChain: Last/bid/ask and implied volatility per contract
//! - SpotQuote: Underlying price
//! - ScreenConfig: Band, horizon and rate parameters

pub mod config;
pub mod error;
pub mod option;
pub mod quote;

pub use config::*;
pub use error::*;
pub use option::*;
pub use quote::*;
