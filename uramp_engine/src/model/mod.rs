//! Pricing and route data types.
//!
//! - `quote`: the static rate table, fee rule and `QuoteEngine`.
//! - `path`: `PathStep` legs and their display helpers.

pub mod path;
pub mod quote;
