//! Near-the-money call screening
//!
//! Pipeline for a single ticker:
//! 1. Fetch the latest close
//! 2. Pick the expiration nearest to the configured horizon
//! 3. Fetch that expiration's chain
//! 4. Keep calls whose strike lies in the band around `offset · spot`
//! 5. Estimate Black-Scholes delta per remaining row
//!
//! Rows whose delta cannot be computed (missing or zero implied volatility,
//! an expiration of today or earlier) are reported as skipped instead of
//! failing the run.

pub mod report;

pub use report::*;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{OptionQuote, ScreenConfig, ScreenError, ScreenResult};
use crate::data::MarketDataProvider;
use crate::models::black_scholes::call_delta;

/// Inclusive strike band around a target strike
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeBand {
    pub target: f64,
    pub low: f64,
    pub high: f64,
}

impl StrikeBand {
    /// Band of ±`tolerance` around `offset · spot`
    pub fn around(spot: f64, offset: f64, tolerance: f64) -> Self {
        let target = spot * offset;
        Self {
            target,
            low: target - tolerance,
            high: target + tolerance,
        }
    }

    pub fn contains(&self, strike: f64) -> bool {
        strike >= self.low && strike <= self.high
    }

    /// Quotes inside the band, in input order
    pub fn filter<'a>(&self, quotes: &'a [OptionQuote]) -> Vec<&'a OptionQuote> {
        quotes.iter().filter(|q| self.contains(q.strike())).collect()
    }
}

/// A screened call with its estimated delta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenedCall {
    pub quote: OptionQuote,
    pub est_delta: f64,
}

/// A call inside the band whose delta could not be estimated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedContract {
    pub contract_symbol: String,
    pub strike: f64,
    pub reason: String,
}

/// Parse a `YYYY-MM-DD` expiration string
pub fn parse_expiration(s: &str) -> ScreenResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| ScreenError::invalid_input(format!("Bad expiration date {:?}: {}", s, e)))
}

/// Expiration with the smallest absolute distance in days from `target`.
///
/// Ties go to the earliest entry in `expirations`.
pub fn select_expiration(expirations: &[NaiveDate], target: NaiveDate) -> Option<NaiveDate> {
    expirations
        .iter()
        .copied()
        .min_by_key(|exp| (*exp - target).num_days().abs())
}

/// Delta for one call given spot, time to expiry in years and rate
pub fn estimate_delta(quote: &OptionQuote, spot: f64, time: f64, rate: f64) -> ScreenResult<f64> {
    let vol = quote
        .implied_vol
        .ok_or_else(|| ScreenError::invalid_params("missing implied volatility"))?;

    call_delta(spot, quote.strike(), time, rate, vol)
}

/// Map each quote to a `ScreenedCall`, splitting off rows that cannot be priced
pub fn estimate_deltas<'a, I>(
    quotes: I,
    spot: f64,
    time: f64,
    rate: f64,
) -> (Vec<ScreenedCall>, Vec<SkippedContract>)
where
    I: IntoIterator<Item = &'a OptionQuote>,
{
    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for quote in quotes {
        match estimate_delta(quote, spot, time, rate) {
            Ok(est_delta) => rows.push(ScreenedCall {
                quote: quote.clone(),
                est_delta,
            }),
            Err(e) => {
                tracing::warn!("Skipping {} (strike {}): {}", quote.symbol(), quote.strike(), e);
                skipped.push(SkippedContract {
                    contract_symbol: quote.symbol().to_string(),
                    strike: quote.strike(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (rows, skipped)
}

/// Run a full screen for `symbol` as of `today`
pub fn run_screen<P>(
    provider: &P,
    symbol: &str,
    config: &ScreenConfig,
    today: NaiveDate,
) -> ScreenResult<ScreenReport>
where
    P: MarketDataProvider + ?Sized,
{
    config.validate()?;

    let spot = provider.latest_price(symbol)?;
    if !spot.is_valid() {
        return Err(ScreenError::data_unavailable(format!(
            "Invalid price {} for {}",
            spot.price, symbol
        )));
    }

    let expirations = provider.expirations(symbol)?;
    if expirations.is_empty() {
        return Err(ScreenError::no_expirations(symbol));
    }

    let expiration = match config.expiration {
        Some(requested) if expirations.contains(&requested) => requested,
        Some(requested) => {
            return Err(ScreenError::invalid_input(format!(
                "{} has no options expiring {}",
                symbol, requested
            )));
        }
        None => {
            let target = today
                .checked_add_signed(Duration::days(config.horizon_days()))
                .ok_or_else(|| {
                    ScreenError::invalid_input(format!(
                        "{} weeks from {} is out of date range",
                        config.weeks_to_expiry, today
                    ))
                })?;
            select_expiration(&expirations, target)
                .ok_or_else(|| ScreenError::no_expirations(symbol))?
        }
    };

    let days_to_expiry = (expiration - today).num_days();
    let time_to_expiry = config.time_to_expiry(days_to_expiry);
    tracing::info!(
        "Using expiration {} ({} days out) for {}",
        expiration,
        days_to_expiry,
        symbol
    );

    let chain = provider.option_chain(symbol, expiration)?;

    let band = StrikeBand::around(spot.price, config.strike_offset, config.strike_tolerance);
    let in_band = band.filter(&chain.calls);
    tracing::debug!(
        "Strike band [{:.2}, {:.2}] keeps {} of {} calls",
        band.low,
        band.high,
        in_band.len(),
        chain.calls.len()
    );

    let (rows, skipped) =
        estimate_deltas(in_band, spot.price, time_to_expiry, config.risk_free_rate);

    Ok(ScreenReport {
        symbol: spot.symbol,
        spot: spot.price,
        currency: spot.currency,
        as_of: today,
        expiration,
        days_to_expiry,
        time_to_expiry,
        strike_offset: config.strike_offset,
        band,
        risk_free_rate: config.risk_free_rate,
        rows,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OptionContract, QuoteChain, SpotQuote};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn call(strike: f64, iv: Option<f64>, expiry: NaiveDate) -> OptionQuote {
        let symbol = format!("TEST{}C{:08}", expiry.format("%y%m%d"), (strike * 1000.0) as u64);
        let mut quote = OptionQuote::new(OptionContract::call("TEST", symbol, strike, expiry));
        quote.last = Some(1.0);
        quote.bid = Some(0.9);
        quote.ask = Some(1.1);
        quote.implied_vol = iv;
        quote
    }

    /// In-memory provider for pipeline tests
    struct MockProvider {
        price: Option<f64>,
        expirations: Vec<NaiveDate>,
        calls: Vec<OptionQuote>,
    }

    impl MarketDataProvider for MockProvider {
        fn latest_price(&self, symbol: &str) -> ScreenResult<SpotQuote> {
            self.price
                .map(|p| SpotQuote::new(symbol, p))
                .ok_or_else(|| ScreenError::data_unavailable("no price"))
        }

        fn expirations(&self, _symbol: &str) -> ScreenResult<Vec<NaiveDate>> {
            Ok(self.expirations.clone())
        }

        fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> ScreenResult<QuoteChain> {
            let mut chain = QuoteChain::new(symbol, expiry);
            for q in &self.calls {
                chain.add(q.clone());
            }
            chain.add(OptionQuote::new(OptionContract::put(symbol, "PUT", 95.0, expiry)));
            Ok(chain)
        }
    }

    fn mock(today: NaiveDate) -> MockProvider {
        let expiry = today + Duration::days(28);
        MockProvider {
            price: Some(100.0),
            expirations: vec![expiry],
            calls: vec![
                call(90.0, Some(0.2), expiry),
                call(95.0, Some(0.25), expiry),
                call(100.0, Some(0.3), expiry),
            ],
        }
    }

    #[test]
    fn test_select_expiration_nearest() {
        let today = date(2026, 10, 19);
        let target = today + Duration::days(28);
        let d20 = today + Duration::days(20);
        let d35 = today + Duration::days(35);

        // 35 is 7 days away, 20 is 8 days away
        assert_eq!(select_expiration(&[d20, d35], target), Some(d35));

        let d36 = today + Duration::days(36);
        assert_eq!(select_expiration(&[d20, d36], target), Some(d20));

        let d37 = today + Duration::days(37);
        assert_eq!(select_expiration(&[d37, d20], target), Some(d20));
    }

    #[test]
    fn test_select_expiration_tie_takes_first() {
        let target = date(2026, 11, 16);
        let before = target - Duration::days(3);
        let after = target + Duration::days(3);

        assert_eq!(select_expiration(&[after, before], target), Some(after));
        assert_eq!(select_expiration(&[before, after], target), Some(before));
        assert_eq!(select_expiration(&[], target), None);
    }

    #[test]
    fn test_parse_expiration() {
        assert_eq!(parse_expiration("2026-11-20").unwrap(), date(2026, 11, 20));
        assert_eq!(parse_expiration(" 2026-11-20 ").unwrap(), date(2026, 11, 20));
        assert!(matches!(parse_expiration("11/20/2026"), Err(ScreenError::InvalidInput(_))));
    }

    #[test]
    fn test_strike_band_edges() {
        let band = StrikeBand::around(100.0, 0.95, 2.0);

        assert_eq!(band.target, 95.0);
        assert!(band.contains(93.00));
        assert!(!band.contains(92.99));
        assert!(band.contains(97.00));
        assert!(!band.contains(97.01));
    }

    #[test]
    fn test_strike_band_filter_keeps_order() {
        let expiry = date(2026, 11, 16);
        let quotes = vec![
            call(96.0, Some(0.2), expiry),
            call(90.0, Some(0.2), expiry),
            call(94.0, Some(0.2), expiry),
        ];

        let kept = StrikeBand::around(100.0, 0.95, 2.0).filter(&quotes);
        let strikes: Vec<f64> = kept.iter().map(|q| q.strike()).collect();
        assert_eq!(strikes, vec![96.0, 94.0]);
    }

    #[test]
    fn test_estimate_deltas_skips_unpriceable() {
        let expiry = date(2026, 11, 16);
        let quotes = vec![
            call(95.0, Some(0.25), expiry),
            call(96.0, Some(0.0), expiry),
            call(97.0, None, expiry),
        ];

        let (rows, skipped) = estimate_deltas(&quotes, 100.0, 28.0 / 365.0, 0.05);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quote, quotes[0]);
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].strike, 96.0);
        assert!(skipped[1].reason.contains("implied volatility"));
    }

    #[test]
    fn test_estimate_deltas_zero_time() {
        let expiry = date(2026, 11, 16);
        let quotes = vec![call(95.0, Some(0.25), expiry)];

        let (rows, skipped) = estimate_deltas(&quotes, 100.0, 0.0, 0.05);
        assert!(rows.is_empty());
        assert_eq!(skipped.len(), 1);
    }

    #[test]
    fn test_run_screen_end_to_end() {
        let today = date(2026, 10, 19);
        let provider = mock(today);

        let report = run_screen(&provider, "TEST", &ScreenConfig::default(), today).unwrap();

        assert_eq!(report.expiration, today + Duration::days(28));
        assert_eq!(report.days_to_expiry, 28);
        assert_eq!(report.rows.len(), 1);
        assert!(report.skipped.is_empty());

        let row = &report.rows[0];
        assert_eq!(row.quote.strike(), 95.0);
        assert_eq!(row.quote.implied_vol, Some(0.25));
        assert!(row.est_delta > 0.0 && row.est_delta < 1.0);

        let expected = call_delta(100.0, 95.0, 28.0 / 365.0, 0.05, 0.25).unwrap();
        assert!((row.est_delta - expected).abs() < 1e-12);
    }

    #[test]
    fn test_run_screen_wider_tolerance() {
        let today = date(2026, 10, 19);
        let provider = mock(today);
        let config = ScreenConfig {
            strike_tolerance: 5.0,
            ..Default::default()
        };

        let report = run_screen(&provider, "TEST", &config, today).unwrap();
        let strikes: Vec<f64> = report.rows.iter().map(|r| r.quote.strike()).collect();
        assert_eq!(strikes, vec![90.0, 95.0, 100.0]);
    }

    #[test]
    fn test_run_screen_no_price() {
        let today = date(2026, 10, 19);
        let mut provider = mock(today);
        provider.price = None;

        let err = run_screen(&provider, "TEST", &ScreenConfig::default(), today).unwrap_err();
        assert!(matches!(err, ScreenError::DataUnavailable(_)));
    }

    #[test]
    fn test_run_screen_invalid_price() {
        let today = date(2026, 10, 19);
        let mut provider = mock(today);
        provider.price = Some(0.0);

        let err = run_screen(&provider, "TEST", &ScreenConfig::default(), today).unwrap_err();
        assert!(matches!(err, ScreenError::DataUnavailable(_)));
    }

    #[test]
    fn test_run_screen_no_expirations() {
        let today = date(2026, 10, 19);
        let mut provider = mock(today);
        provider.expirations.clear();

        let err = run_screen(&provider, "TEST", &ScreenConfig::default(), today).unwrap_err();
        assert!(matches!(err, ScreenError::NoExpirationsFound(ref s) if s == "TEST"));
    }

    #[test]
    fn test_run_screen_expiration_override() {
        let today = date(2026, 10, 19);
        let provider = mock(today);

        let listed = ScreenConfig {
            expiration: Some(today + Duration::days(28)),
            ..Default::default()
        };
        assert!(run_screen(&provider, "TEST", &listed, today).is_ok());

        let unlisted = ScreenConfig {
            expiration: Some(today + Duration::days(30)),
            ..Default::default()
        };
        let err = run_screen(&provider, "TEST", &unlisted, today).unwrap_err();
        assert!(matches!(err, ScreenError::InvalidInput(_)));
    }

    #[test]
    fn test_run_screen_expiring_today_skips_rows() {
        let today = date(2026, 10, 19);
        let mut provider = mock(today);
        provider.expirations = vec![today];

        let report = run_screen(&provider, "TEST", &ScreenConfig::default(), today).unwrap();
        assert_eq!(report.days_to_expiry, 0);
        assert!(report.rows.is_empty());
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_run_screen_horizon_out_of_range() {
        let today = date(2026, 10, 19);
        let provider = mock(today);

        let too_far = ScreenConfig {
            weeks_to_expiry: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            run_screen(&provider, "TEST", &too_far, today),
            Err(ScreenError::InvalidInput(_))
        ));

        // Longest accepted horizon near the end of the calendar still fails cleanly
        let near_max = NaiveDate::MAX - Duration::days(10);
        let longest = ScreenConfig {
            weeks_to_expiry: crate::core::MAX_WEEKS_TO_EXPIRY,
            ..Default::default()
        };
        assert!(matches!(
            run_screen(&provider, "TEST", &longest, near_max),
            Err(ScreenError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_run_screen_rejects_bad_config() {
        let today = date(2026, 10, 19);
        let provider = mock(today);
        let config = ScreenConfig {
            days_per_year: 0.0,
            ..Default::default()
        };

        assert!(matches!(
            run_screen(&provider, "TEST", &config, today),
            Err(ScreenError::InvalidInput(_))
        ));
    }
}
