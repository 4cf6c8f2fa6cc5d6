//! uRamp conversion engine.
//!
//! Wires together the building blocks behind the CLI:
//!
//! - `model`: static rate table, fee rule (`QuoteEngine`) and route legs (`PathStep`).
//! - `routing`: which legs a pair needs and whether the enabled providers cover them.
//! - `store`: local key-value storage (`FileStore`, `MemoryStore`).
//! - `toggles`: persisted provider toggles and mock credentials.
//! - `enablement`: the provider ON/OFF workflow (`Switchboard`).
//! - `api`: simulated backend calls with artificial delays and cancellation.
//! - `desk`: quote, route and execute one conversion (`ConversionDesk`).
//!
//! Nothing here talks to a network: rates are fixed, submissions return random
//! identifiers, and the only state is the key-value store.
#![warn(missing_docs)]

pub mod api;
pub mod desk;
pub mod enablement;
pub mod model;
pub mod routing;
pub mod store;
pub mod toggles;

pub use api::{Pending, SimulatedApi, SimulationConfig};
pub use desk::{ConversionDesk, Execution, QuoteTicket};
pub use enablement::{EnableAction, ProviderState, ProviderStatus, Switchboard};
pub use model::path::PathStep;
pub use model::quote::QuoteEngine;
pub use routing::{Eligibility, LegRequirement};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use toggles::{Credentials, ProviderToggles};
