//! Pricing models
//!
//! Implements:
//! - Black-Scholes call delta

pub mod black_scholes;

pub use black_scholes::*;
