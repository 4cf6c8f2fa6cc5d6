//! Provider enablement workflow.
//!
//! `Switchboard` owns the store and an in-memory copy of the toggles. Every
//! transition is written back to the store before the call returns.
//!
//! - Swap providers flip directly.
//! - Ramp providers switch OFF directly but only switch ON through one of the
//!   enable models they offer (see [`ProviderDef::enable_models`]).
//!
//! Credentials are not validated; the non-direct models are stubs that only
//! produce a confirmation message.

use log::info;
use serde::Serialize;
use strum::Display;
use uramp_common::provider::{EnableModel, PROVIDERS, ProviderCategory, ProviderDef, find_provider};
use uramp_common::{RampError, Result};

use crate::store::KeyValueStore;
use crate::toggles::{Credentials, ProviderToggles};

/// Whether a provider is currently routable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ProviderState {
    /// Not considered for routing.
    Off,
    /// Considered for routing.
    On,
}

/// What the user did to switch a ramp provider on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnableAction {
    /// Saved API credentials.
    Direct(Credentials),
    /// Granted OAuth access to an existing account.
    OAuthGrant,
    /// Had no account and signed up from the link flow.
    LinkSignup,
    /// Finished the embedded signup flow.
    EmbeddedSignup,
    /// Asked for a sub-account for this email.
    SubAccount {
        /// Contact email of the end user.
        email: String,
    },
}

impl EnableAction {
    /// Enable model the action belongs to.
    pub fn model(&self) -> EnableModel {
        match self {
            EnableAction::Direct(_) => EnableModel::Direct,
            EnableAction::OAuthGrant | EnableAction::LinkSignup => EnableModel::Link,
            EnableAction::EmbeddedSignup => EnableModel::EmbeddedSignup,
            EnableAction::SubAccount { .. } => EnableModel::SubAccount,
        }
    }
}

/// Result of switching a provider on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnableOutcome {
    /// Provider that is now on.
    pub provider: &'static ProviderDef,
    /// Confirmation shown to the user.
    pub message: String,
}

/// One provider as listed on the routing screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    /// Registry entry.
    #[serde(flatten)]
    pub provider: &'static ProviderDef,
    /// Current state.
    pub state: ProviderState,
    /// Models that can switch it on; empty for swap providers.
    pub enable_models: &'static [EnableModel],
}

/// Provider toggle state machine bound to a store.
pub struct Switchboard<S: KeyValueStore> {
    store: S,
    toggles: ProviderToggles,
}

impl<S: KeyValueStore> Switchboard<S> {
    /// Load the saved toggles from `store`.
    pub fn open(store: S) -> Result<Self> {
        let toggles = ProviderToggles::load(&store)?;
        Ok(Self { store, toggles })
    }

    /// Current toggles.
    pub fn toggles(&self) -> &ProviderToggles {
        &self.toggles
    }

    /// Give the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    /// State of one provider.
    pub fn state(&self, id: &str) -> Result<ProviderState> {
        let provider = lookup(id)?;
        Ok(self.state_of(provider))
    }

    /// Every provider with its state, in registry order, optionally limited
    /// to one category.
    pub fn listing(&self, category: Option<ProviderCategory>) -> Vec<ProviderStatus> {
        PROVIDERS
            .iter()
            .filter(|p| category.is_none_or(|c| c == p.category))
            .map(|provider| ProviderStatus {
                provider,
                state: self.state_of(provider),
                enable_models: provider.enable_models(),
            })
            .collect()
    }

    fn state_of(&self, provider: &ProviderDef) -> ProviderState {
        if self.toggles.is_enabled(provider.id) {
            ProviderState::On
        } else {
            ProviderState::Off
        }
    }

    /// Flip a provider the way the routing switch does.
    ///
    /// Ramp providers that are OFF cannot be flipped on; they need
    /// [`Self::enable`] and this returns `RampError::EnableModelRequired`.
    pub fn toggle(&mut self, id: &str) -> Result<ProviderState> {
        let provider = lookup(id)?;
        if provider.category == ProviderCategory::Ramp
            && self.state_of(provider) == ProviderState::Off
        {
            return Err(RampError::EnableModelRequired(provider.id.to_string()));
        }
        self.toggles.flip(provider.id);
        self.persist()?;
        let state = self.state_of(provider);
        info!("Provider {} switched {}", provider.name, state);
        Ok(state)
    }

    /// Switch a provider OFF. Idempotent.
    pub fn disable(&mut self, id: &str) -> Result<()> {
        let provider = lookup(id)?;
        self.toggles.set(provider.id, false);
        self.persist()?;
        info!("Provider {} switched OFF", provider.name);
        Ok(())
    }

    /// Switch a ramp provider ON through one of its enable models.
    pub fn enable(&mut self, id: &str, action: EnableAction) -> Result<EnableOutcome> {
        let provider = lookup(id)?;
        let model = action.model();
        if !provider.supports(model) {
            return Err(RampError::UnsupportedEnableModel {
                provider: provider.id.to_string(),
                model,
            });
        }

        let message = match action {
            EnableAction::Direct(credentials) => {
                credentials.save(&mut self.store, provider.id)?;
                format!("Credentials saved for {}", provider.name)
            }
            EnableAction::OAuthGrant => {
                format!("Granted uRamp access to your {} account", provider.name)
            }
            EnableAction::LinkSignup | EnableAction::EmbeddedSignup => {
                format!("Signed up on {}", provider.name)
            }
            EnableAction::SubAccount { email } => {
                format!("Account created on {} for {}", provider.name, email)
            }
        };

        self.toggles.set(provider.id, true);
        self.persist()?;
        info!("Provider {} switched ON via {}", provider.name, model);
        Ok(EnableOutcome { provider, message })
    }

    fn persist(&mut self) -> Result<()> {
        self.toggles.save(&mut self.store)
    }
}

fn lookup(id: &str) -> Result<&'static ProviderDef> {
    find_provider(id).ok_or_else(|| RampError::UnknownProvider(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Eligibility;
    use crate::store::MemoryStore;
    use uramp_common::Currency;

    fn board() -> Switchboard<MemoryStore> {
        Switchboard::open(MemoryStore::new()).unwrap()
    }

    #[test]
    fn swap_providers_toggle_directly() {
        let mut board = board();
        assert_eq!(board.toggle("lifi").unwrap(), ProviderState::Off);
        assert_eq!(board.toggle("lifi").unwrap(), ProviderState::On);
    }

    #[test]
    fn ramp_providers_turn_off_directly_but_not_on() {
        let mut board = board();
        assert_eq!(board.toggle("noah").unwrap(), ProviderState::Off);
        assert!(matches!(
            board.toggle("noah"),
            Err(RampError::EnableModelRequired(id)) if id == "noah"
        ));
        assert_eq!(board.state("noah").unwrap(), ProviderState::Off);
    }

    #[test]
    fn enable_rejects_models_the_provider_lacks() {
        let mut board = board();
        board.disable("pdax").unwrap();
        let err = board
            .enable("pdax", EnableAction::SubAccount { email: "a@b.c".into() })
            .unwrap_err();
        assert!(matches!(
            err,
            RampError::UnsupportedEnableModel { model: EnableModel::SubAccount, .. }
        ));
        assert!(matches!(
            board.enable("lifi", EnableAction::OAuthGrant),
            Err(RampError::UnsupportedEnableModel { .. })
        ));
        assert_eq!(board.state("pdax").unwrap(), ProviderState::Off);
    }

    #[test]
    fn direct_model_saves_credentials() {
        let mut board = board();
        board.disable("monerium").unwrap();
        let creds = Credentials {
            api_key: "key".into(),
            api_secret: "secret".into(),
            account_id: "acc".into(),
        };
        let outcome = board
            .enable("monerium", EnableAction::Direct(creds.clone()))
            .unwrap();
        assert_eq!(outcome.message, "Credentials saved for Monerium");
        assert_eq!(board.state("monerium").unwrap(), ProviderState::On);

        let store = board.into_store();
        assert_eq!(Credentials::load(&store, "monerium").unwrap(), Some(creds));
    }

    #[test]
    fn stub_models_switch_on() {
        let mut board = board();
        for id in ["pdax", "brla", "noah"] {
            board.disable(id).unwrap();
        }
        board.enable("pdax", EnableAction::OAuthGrant).unwrap();
        board.enable("brla", EnableAction::EmbeddedSignup).unwrap();
        let outcome = board
            .enable("noah", EnableAction::SubAccount { email: "jane@example.com".into() })
            .unwrap();
        assert_eq!(outcome.message, "Account created on Noah for jane@example.com");
        for id in ["pdax", "brla", "noah"] {
            assert_eq!(board.state(id).unwrap(), ProviderState::On);
        }
    }

    #[test]
    fn transitions_persist_immediately() {
        let mut store = MemoryStore::new();
        {
            let mut board = Switchboard::open(&mut store).unwrap();
            board.toggle("cowswap").unwrap();
        }
        let reopened = Switchboard::open(store).unwrap();
        assert_eq!(reopened.state("cowswap").unwrap(), ProviderState::Off);
        assert_eq!(reopened.state("1inch").unwrap(), ProviderState::On);
    }

    #[test]
    fn toggling_off_then_on_restores_eligibility() {
        let mut board = board();
        for id in ["cowswap", "1inch"] {
            board.disable(id).unwrap();
        }
        let before = Eligibility::evaluate(Currency::USD, Currency::BTC, board.toggles());
        assert!(!before.is_blocked());

        board.toggle("lifi").unwrap();
        let during = Eligibility::evaluate(Currency::USD, Currency::BTC, board.toggles());
        assert!(during.missing_swap);

        board.toggle("lifi").unwrap();
        let after = Eligibility::evaluate(Currency::USD, Currency::BTC, board.toggles());
        assert_eq!(before, after);
    }

    #[test]
    fn listing_reports_state_and_models() {
        let mut board = board();
        board.disable("monerium").unwrap();

        let all = board.listing(None);
        assert_eq!(all.len(), PROVIDERS.len());
        assert_eq!(all[0].provider.name, "Monerium");
        assert_eq!(all[0].state, ProviderState::Off);
        assert_eq!(all[0].enable_models, &[EnableModel::Direct, EnableModel::SubAccount]);

        let swaps = board.listing(Some(ProviderCategory::Swap));
        assert_eq!(swaps.len(), 3);
        assert!(swaps.iter().all(|s| s.state == ProviderState::On && s.enable_models.is_empty()));

        let json = serde_json::to_value(&all[0]).unwrap();
        assert_eq!(json["id"], "monerium");
        assert_eq!(json["name"], "Monerium");
        assert_eq!(json["category"], "ramp");
        assert_eq!(json["state"], "off");
        assert_eq!(json["enableModels"][1], "sub-account");
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let mut board = board();
        assert!(matches!(board.toggle("nope"), Err(RampError::UnknownProvider(_))));
        assert!(matches!(board.state("nope"), Err(RampError::UnknownProvider(_))));
    }
}
