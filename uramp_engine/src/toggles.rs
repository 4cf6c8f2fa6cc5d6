//! Persisted provider toggles and mock credentials.
//!
//! Toggles live under [`ROUTING_STORAGE_KEY`] as a JSON object of provider id
//! to bool. A missing or unreadable value means "everything enabled"; an id
//! missing from a stored object reads as disabled.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};
use uramp_common::provider::{PROVIDERS, ProviderCategory, ProviderDef, providers_in};
use uramp_common::Result;

use crate::store::KeyValueStore;

/// Store key of the toggle map.
pub const ROUTING_STORAGE_KEY: &str = "uramp.routing.providers";
/// Prefix of per-provider credential keys.
pub const CREDENTIALS_KEY_PREFIX: &str = "uramp.credentials.";

/// Provider id -> enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderToggles(BTreeMap<String, bool>);

impl ProviderToggles {
    /// Every registered provider switched on.
    pub fn all_enabled() -> Self {
        Self(PROVIDERS.iter().map(|p| (p.id.to_string(), true)).collect())
    }

    /// Every registered provider switched off.
    pub fn all_disabled() -> Self {
        Self(PROVIDERS.iter().map(|p| (p.id.to_string(), false)).collect())
    }

    /// Read the saved toggles, falling back to [`Self::all_enabled`].
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        let Some(raw) = store.get_item(ROUTING_STORAGE_KEY)? else {
            return Ok(Self::all_enabled());
        };
        match serde_json::from_str(&raw) {
            Ok(toggles) => Ok(toggles),
            Err(e) => {
                warn!("Discarding unreadable provider toggles: {}", e);
                Ok(Self::all_enabled())
            }
        }
    }

    /// Persist under [`ROUTING_STORAGE_KEY`].
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        let raw = serde_json::to_string(self)?;
        store.set_item(ROUTING_STORAGE_KEY, &raw)
    }

    /// `true` only when the id is present and set.
    pub fn is_enabled(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Set one provider.
    pub fn set(&mut self, id: &str, enabled: bool) {
        self.0.insert(id.to_string(), enabled);
    }

    /// Flip one provider and return its new state.
    pub fn flip(&mut self, id: &str) -> bool {
        let enabled = !self.is_enabled(id);
        self.set(id, enabled);
        enabled
    }

    /// Enabled providers of `category`, in registry order.
    pub fn enabled_in(&self, category: ProviderCategory) -> Vec<&'static ProviderDef> {
        providers_in(category)
            .filter(|p| self.is_enabled(p.id))
            .collect()
    }

    /// `true` when at least one provider of `category` is enabled.
    pub fn has_enabled(&self, category: ProviderCategory) -> bool {
        providers_in(category).any(|p| self.is_enabled(p.id))
    }
}

impl Default for ProviderToggles {
    fn default() -> Self {
        Self::all_enabled()
    }
}

/// Mock API credentials saved by the direct enable model. Stored in plaintext.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// API key.
    pub api_key: String,
    /// API secret.
    pub api_secret: String,
    /// Optional account id; empty when not given.
    #[serde(default)]
    pub account_id: String,
}

impl Credentials {
    /// Store key for `provider_id`.
    pub fn storage_key(provider_id: &str) -> String {
        format!("{}{}", CREDENTIALS_KEY_PREFIX, provider_id)
    }

    /// Save for `provider_id`, replacing any previous value.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S, provider_id: &str) -> Result<()> {
        let raw = serde_json::to_string(self)?;
        store.set_item(&Self::storage_key(provider_id), &raw)
    }

    /// Saved credentials for `provider_id`; unreadable values read as absent.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, provider_id: &str) -> Result<Option<Self>> {
        let Some(raw) = store.get_item(&Self::storage_key(provider_id))? else {
            return Ok(None);
        };
        Ok(serde_json::from_str(&raw).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn missing_key_means_all_enabled() {
        let store = MemoryStore::new();
        let toggles = ProviderToggles::load(&store).unwrap();
        assert_eq!(toggles, ProviderToggles::all_enabled());
        assert_eq!(toggles.enabled_in(ProviderCategory::Ramp).len(), 7);
    }

    #[test]
    fn unparseable_value_means_all_enabled() {
        let mut store = MemoryStore::new();
        for raw in ["{oops", "[]", "null", "42"] {
            store.set_item(ROUTING_STORAGE_KEY, raw).unwrap();
            let toggles = ProviderToggles::load(&store).unwrap();
            assert_eq!(toggles, ProviderToggles::all_enabled(), "{raw}");
        }
    }

    #[test]
    fn ids_missing_from_saved_map_are_disabled() {
        let mut store = MemoryStore::new();
        store
            .set_item(ROUTING_STORAGE_KEY, r#"{"noah":true}"#)
            .unwrap();
        let toggles = ProviderToggles::load(&store).unwrap();
        assert!(toggles.is_enabled("noah"));
        assert!(!toggles.is_enabled("monerium"));
        assert!(!toggles.has_enabled(ProviderCategory::Swap));
    }

    #[test]
    fn save_then_load_keeps_state() {
        let mut store = MemoryStore::new();
        let mut toggles = ProviderToggles::all_enabled();
        assert!(!toggles.flip("lifi"));
        toggles.save(&mut store).unwrap();

        let raw = store.get_item(ROUTING_STORAGE_KEY).unwrap().unwrap();
        assert!(raw.contains(r#""lifi":false"#));
        assert_eq!(ProviderToggles::load(&store).unwrap(), toggles);
    }

    #[test]
    fn credentials_use_per_provider_key() {
        let mut store = MemoryStore::new();
        let creds = Credentials {
            api_key: "k".into(),
            api_secret: "s".into(),
            account_id: String::new(),
        };
        creds.save(&mut store, "monerium").unwrap();

        assert!(store
            .get_item("uramp.credentials.monerium")
            .unwrap()
            .unwrap()
            .contains(r#""apiKey":"k""#));
        assert_eq!(Credentials::load(&store, "monerium").unwrap(), Some(creds));
        assert_eq!(Credentials::load(&store, "noah").unwrap(), None);
    }
}
