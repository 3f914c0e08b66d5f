//! Screening report and console rendering

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ScreenedCall, SkippedContract, StrikeBand};

/// Result of one screening run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenReport {
    pub symbol: String,
    pub spot: f64,
    pub currency: Option<String>,
    /// Date the run was priced as of
    pub as_of: NaiveDate,
    pub expiration: NaiveDate,
    pub days_to_expiry: i64,
    /// Time to expiry in years
    pub time_to_expiry: f64,
    pub strike_offset: f64,
    pub band: StrikeBand,
    pub risk_free_rate: f64,
    pub rows: Vec<ScreenedCall>,
    pub skipped: Vec<SkippedContract>,
}

impl ScreenReport {
    /// Header label such as "~5% below current price"
    pub fn band_label(&self) -> String {
        let pct = (1.0 - self.strike_offset) * 100.0;
        if pct.abs() < 0.05 {
            "~at current price".to_string()
        } else if pct > 0.0 {
            format!("~{}% below current price", trim_pct(pct))
        } else {
            format!("~{}% above current price", trim_pct(-pct))
        }
    }
}

fn trim_pct(pct: f64) -> String {
    let s = format!("{:.1}", pct);
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}

fn cell(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

const HEADERS: [&str; 7] = [
    "contractSymbol",
    "strike",
    "lastPrice",
    "bid",
    "ask",
    "impliedVolatility",
    "est_delta",
];

impl fmt::Display for ScreenReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current {} Price: ${:.2}", self.symbol, self.spot)?;
        writeln!(
            f,
            "Using expiration date: {} ({} days out)",
            self.expiration, self.days_to_expiry
        )?;
        writeln!(f)?;
        writeln!(f, "Filtered Call Options ({}):", self.band_label())?;

        if self.rows.is_empty() {
            writeln!(
                f,
                "No calls with strikes in [{:.2}, {:.2}]",
                self.band.low, self.band.high
            )?;
        } else {
            let table: Vec<[String; 7]> = self
                .rows
                .iter()
                .map(|row| {
                    let q = &row.quote;
                    [
                        q.symbol().to_string(),
                        format!("{:.2}", q.strike()),
                        cell(q.last, 2),
                        cell(q.bid, 2),
                        cell(q.ask, 2),
                        cell(q.implied_vol, 6),
                        format!("{:.6}", row.est_delta),
                    ]
                })
                .collect();

            let mut widths = HEADERS.map(str::len);
            for row in &table {
                for (w, c) in widths.iter_mut().zip(row.iter()) {
                    *w = (*w).max(c.len());
                }
            }

            write!(f, "{:<w$}", HEADERS[0], w = widths[0])?;
            for (h, w) in HEADERS.iter().zip(widths.iter()).skip(1) {
                write!(f, "  {:>w$}", h, w = *w)?;
            }
            writeln!(f)?;

            for row in &table {
                write!(f, "{:<w$}", row[0], w = widths[0])?;
                for (c, w) in row.iter().zip(widths.iter()).skip(1) {
                    write!(f, "  {:>w$}", c, w = *w)?;
                }
                writeln!(f)?;
            }
        }

        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped {} contract(s):", self.skipped.len())?;
            for s in &self.skipped {
                writeln!(f, "  {} (strike {:.2}): {}", s.contract_symbol, s.strike, s.reason)?;
            }
        }

        Ok(())
    }
}
