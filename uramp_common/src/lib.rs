//!
//! Common types and utilities shared by the uRamp engine and CLI.
//!
//! This crate aggregates:
//! - `error`: unified error type `RampError` used across the workspace.
//! - `result`: handy `Result<T, RampError>` alias.
//! - `currency`: currency codes, chains, selections and the picker catalog.
//! - `provider`: the static provider registry and ramp enable models.
//! - `quote`: the quote payload.
//! - `order`: conversion flavours and submission receipts.
//! - `activity`: activity history entries.
#![warn(missing_docs)]
pub mod activity;
pub mod currency;
pub mod error;
pub mod order;
pub mod provider;
pub mod quote;
pub mod result;

pub use currency::{Chain, Currency, CurrencyKind, CurrencySelection};
pub use error::RampError;
pub use provider::{EnableModel, ProviderCategory, ProviderDef, PROVIDERS};
pub use quote::Quote;
pub use result::Result;
