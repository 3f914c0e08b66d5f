//! Yahoo Finance data fetcher
//!
//! Uses Yahoo Finance's unofficial JSON API:
//! - `v8/finance/chart` for the latest daily close
//! - `v7/finance/options` for expirations and per-expiry chains
//!
//! Note: This is for educational/research purposes. Yahoo Finance
//! data is delayed ~15 minutes and intended for personal use.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::provider::MarketDataProvider;
use crate::core::{OptionContract, OptionQuote, QuoteChain, ScreenError, ScreenResult, SpotQuote};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(timeout: Duration) -> ScreenResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Client pointed at an alternative host (mirrors, proxies)
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> ScreenResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ScreenError::data_source(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> ScreenResult<T> {
        tracing::debug!("GET {}", url);

        self.client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScreenError::data_source(e.to_string()))?
            .json()
            .map_err(|e| ScreenError::Serialization(format!("Failed to parse response: {}", e)))
    }

    fn options_url(&self, symbol: &str) -> String {
        format!("{}/v7/finance/options/{}", self.base_url, symbol)
    }
}

impl MarketDataProvider for YahooClient {
    fn latest_price(&self, symbol: &str) -> ScreenResult<SpotQuote> {
        let url = format!(
            "{}/v8/finance/chart/{}?range=1d&interval=1d",
            self.base_url, symbol
        );

        let response: YahooChartResponse = self.get_json(&url)?;
        let quote = response.into_spot(symbol)?;

        tracing::info!("Fetched {} close {:.2}", symbol, quote.price);
        Ok(quote)
    }

    fn expirations(&self, symbol: &str) -> ScreenResult<Vec<NaiveDate>> {
        let response: YahooOptionsResponse = self.get_json(&self.options_url(symbol))?;
        let expiries = response.into_chain_data(symbol)?.expirations();

        tracing::info!("{} lists {} expirations", symbol, expiries.len());
        Ok(expiries)
    }

    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> ScreenResult<QuoteChain> {
        // Yahoo keys expirations by midnight UTC
        let expiry_ts = expiry.and_time(NaiveTime::MIN).and_utc().timestamp();
        let url = format!("{}?date={}", self.options_url(symbol), expiry_ts);

        let response: YahooOptionsResponse = self.get_json(&url)?;
        let chain = response.into_chain_data(symbol)?.into_chain(symbol, expiry);

        tracing::info!(
            "Fetched {} chain for {}: {} calls, {} puts",
            symbol,
            expiry,
            chain.calls.len(),
            chain.puts.len()
        );
        Ok(chain)
    }
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooChartResult>>,
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct YahooApiError {
    code: Option<String>,
    description: Option<String>,
}

impl YahooApiError {
    fn into_error(self) -> ScreenError {
        ScreenError::data_source(format!(
            "{}: {}",
            self.code.unwrap_or_else(|| "error".into()),
            self.description.unwrap_or_default()
        ))
    }
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    meta: YahooChartMeta,
    #[serde(default)]
    indicators: Option<YahooIndicators>,
}

#[derive(Debug, Deserialize)]
struct YahooChartMeta {
    currency: Option<String>,
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    #[serde(default)]
    quote: Vec<YahooIndicatorQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicatorQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl YahooChartResponse {
    /// Last non-null daily close, falling back to the regular market price
    fn into_spot(self, symbol: &str) -> ScreenResult<SpotQuote> {
        if let Some(err) = self.chart.error {
            return Err(err.into_error());
        }

        let result = self
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| {
                ScreenError::data_unavailable(format!("No price data returned for {}", symbol))
            })?;

        let close = result
            .indicators
            .and_then(|ind| ind.quote.into_iter().next())
            .and_then(|q| q.close.into_iter().rev().flatten().next());

        let price = close
            .or(result.meta.regular_market_price)
            .ok_or_else(|| {
                ScreenError::data_unavailable(format!("No close price for {}", symbol))
            })?;

        let mut quote = SpotQuote::new(symbol, price);
        quote.currency = result.meta.currency;

        if !quote.is_valid() {
            return Err(ScreenError::data_unavailable(format!(
                "Invalid price {} for {}",
                price, symbol
            )));
        }
        Ok(quote)
    }
}

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Option<Vec<YahooOptionChainData>>,
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    #[serde(default)]
    calls: Vec<YahooOptionData>,
    #[serde(default)]
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    #[serde(rename = "contractSymbol")]
    contract_symbol: Option<String>,
    strike: Option<f64>,
    #[serde(rename = "lastPrice")]
    last_price: Option<f64>,
    bid: Option<f64>,
    ask: Option<f64>,
    #[serde(rename = "impliedVolatility")]
    implied_volatility: Option<f64>,
}

impl YahooOptionsResponse {
    fn into_chain_data(self, symbol: &str) -> ScreenResult<YahooOptionChainData> {
        if let Some(err) = self.option_chain.error {
            return Err(err.into_error());
        }

        self.option_chain
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| {
                ScreenError::data_unavailable(format!("No options data returned for {}", symbol))
            })
    }
}

impl YahooOptionChainData {
    fn expirations(&self) -> Vec<NaiveDate> {
        self.expiration_dates
            .iter()
            .filter_map(|&ts| DateTime::<Utc>::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
            .collect()
    }

    fn into_chain(self, symbol: &str, expiry: NaiveDate) -> QuoteChain {
        let mut chain = QuoteChain::new(symbol, expiry);

        if let Some(options) = self.options.into_iter().next() {
            for call in options.calls {
                if let Some(strike) = call.strike {
                    let contract = OptionContract::call(
                        symbol,
                        call.contract_symbol.clone().unwrap_or_default(),
                        strike,
                        expiry,
                    );
                    chain.add(call.into_quote(contract));
                }
            }

            for put in options.puts {
                if let Some(strike) = put.strike {
                    let contract = OptionContract::put(
                        symbol,
                        put.contract_symbol.clone().unwrap_or_default(),
                        strike,
                        expiry,
                    );
                    chain.add(put.into_quote(contract));
                }
            }
        }

        chain
    }
}

impl YahooOptionData {
    fn into_quote(self, contract: OptionContract) -> OptionQuote {
        let mut quote = OptionQuote::new(contract);
        quote.last = self.last_price;
        quote.bid = self.bid;
        quote.ask = self.ask;
        quote.implied_vol = self.implied_volatility;
        quote
    }
}
