//! Market-data sources
//!
//! Handles:
//! - The provider trait the screener runs against
//! - Yahoo Finance API (free, delayed)
//! - JSON snapshots for offline runs

pub mod provider;
pub mod snapshot;
pub mod yahoo;

pub use provider::*;
pub use snapshot::*;
pub use yahoo::*;
