//! # Call Delta Screener
//!
//! Screens near-the-money call options for a single ticker and estimates
//! their Black-Scholes delta.
//!
//! ## Overview
//!
//! One run:
//! - fetches the latest close for the underlying
//! - picks the listed expiration nearest to a horizon (4 weeks by default)
//! - keeps calls whose strike sits within ±2 of 95% of spot (both configurable)
//! - estimates delta = Φ(d1) per remaining call from its implied volatility
//!
//! ## Key Components
//!
//! - **Data Fetching**: Yahoo Finance, or an offline JSON snapshot
//! - **Black-Scholes**: Call delta with input validation
//! - **Screen**: Expiration selection, strike band, report rendering
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use call_delta_screener::prelude::*;
//!
//! let client = YahooClient::new(Duration::from_secs(30)).unwrap();
//! let today = chrono::Local::now().date_naive();
//!
//! let report = run_screen(&client, "COST", &ScreenConfig::default(), today).unwrap();
//! println!("{}", report);
//! ```
//!
//! ## What This Does NOT Do
//!
//! - Price options or compute Greeks other than delta
//! - Screen several tickers in one run
//! - Retry failed provider calls

pub mod core;
pub mod data;
pub mod models;
pub mod screen;

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::core::{
        OptionContract, OptionQuote, OptionType, QuoteChain, ScreenConfig, ScreenError,
        ScreenResult, SpotQuote,
    };

    pub use crate::data::{MarketDataProvider, Snapshot, SnapshotProvider, YahooClient};

    pub use crate::models::{call_delta, norm_cdf};

    pub use crate::screen::{
        estimate_deltas, parse_expiration, run_screen, select_expiration, ScreenReport,
        ScreenedCall, SkippedContract, StrikeBand,
    };
}

pub use crate::core::{ScreenError, ScreenResult};
