//! Error type shared by the engine and the CLI.
//!
//! The `RampError` enum unifies storage, serialization, lookup and routing
//! failures so every crate in the workspace can propagate a single error type.
use std::io;

use thiserror::Error;

use crate::currency::{Chain, Currency};
use crate::provider::EnableModel;

/// Unified error type shared by the engine and the CLI.
#[derive(Error, Debug)]
pub enum RampError {
    /// I/O error while reading or writing the local store.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A currency code that is neither a supported fiat nor crypto code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// A chain name that is not one of the supported chains.
    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    /// A chain was given for a currency that is not issued on it.
    #[error("{currency} is not available on {chain}")]
    UnsupportedChain {
        /// Selected currency.
        currency: Currency,
        /// Requested chain.
        chain: Chain,
    },

    /// No provider with this identifier is registered.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// The provider does not offer the requested enable model.
    #[error("Provider {provider} does not support the {model} enable model")]
    UnsupportedEnableModel {
        /// Provider identifier.
        provider: String,
        /// Requested model.
        model: EnableModel,
    },

    /// Ramp providers can only be switched on through one of their enable models.
    #[error("Provider {0} must be enabled through one of its enable models")]
    EnableModelRequired(String),

    /// The enabled provider set cannot serve the selected pair.
    #[error("Routing blocked: {0}")]
    RoutingBlocked(String),

    /// A simulated request worker went away before delivering its result.
    #[error("Pending request failed: {0}")]
    ChannelRecv(String),
}
