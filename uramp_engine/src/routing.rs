//! Routing resolver.
//!
//! Decides which legs a conversion needs, whether the enabled providers can run
//! them, and which provider runs each leg.
//!
//! | direction     | legs                                          |
//! |---------------|-----------------------------------------------|
//! | fiat → crypto | ramp, then swap unless the crypto is a stable match |
//! | crypto → fiat | swap, then ramp                               |
//! | crypto → crypto, fiat → fiat | swap                           |

use log::debug;
use rand::Rng;
use serde::Serialize;
use uramp_common::{Currency, ProviderCategory, RampError, Result};

use crate::model::path::PathStep;
use crate::toggles::ProviderToggles;

/// Stablecoins that are the same currency as `fiat`.
pub fn stable_matches(fiat: Currency) -> &'static [Currency] {
    match fiat {
        Currency::USD => &[Currency::USDC, Currency::USDT],
        _ => &[],
    }
}

/// `true` for on-ramps that need no swap, e.g. USD → USDC.
pub fn is_same_currency_onramp(fiat: Currency, crypto: Currency) -> bool {
    fiat.is_fiat() && stable_matches(fiat).contains(&crypto)
}

/// Legs a conversion needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegRequirement {
    /// Needs a fiat <-> crypto leg.
    pub ramp: bool,
    /// Needs a crypto <-> crypto leg.
    pub swap: bool,
}

impl LegRequirement {
    /// Classify `from -> to`.
    pub fn for_pair(from: Currency, to: Currency) -> Self {
        match (from.is_fiat(), to.is_fiat()) {
            (true, false) => Self {
                ramp: true,
                swap: !is_same_currency_onramp(from, to),
            },
            (false, true) => Self {
                ramp: true,
                swap: true,
            },
            _ => Self {
                ramp: false,
                swap: true,
            },
        }
    }

    /// Categories that must have an enabled provider.
    pub fn categories(&self) -> Vec<ProviderCategory> {
        let mut categories = Vec::with_capacity(2);
        if self.ramp {
            categories.push(ProviderCategory::Ramp);
        }
        if self.swap {
            categories.push(ProviderCategory::Swap);
        }
        categories
    }
}

/// Whether the enabled providers can serve a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Eligibility {
    /// Legs the pair needs.
    pub requirement: LegRequirement,
    /// A ramp leg is needed and no ramp provider is enabled.
    pub missing_ramp: bool,
    /// A swap leg is needed and no swap provider is enabled.
    pub missing_swap: bool,
}

impl Eligibility {
    /// Evaluate `from -> to` against `toggles`.
    pub fn evaluate(from: Currency, to: Currency, toggles: &ProviderToggles) -> Self {
        let requirement = LegRequirement::for_pair(from, to);
        Self {
            requirement,
            missing_ramp: requirement.ramp && !toggles.has_enabled(ProviderCategory::Ramp),
            missing_swap: requirement.swap && !toggles.has_enabled(ProviderCategory::Swap),
        }
    }

    /// `true` when quoting and submitting must be refused.
    pub fn is_blocked(&self) -> bool {
        self.missing_ramp || self.missing_swap
    }

    /// Hints telling the user what to enable.
    pub fn hints(&self) -> Vec<&'static str> {
        let mut hints = Vec::new();
        if self.missing_ramp {
            hints.push("Enable at least one Ramp provider in Routing.");
        }
        if self.missing_swap {
            hints.push("Enable at least one Swap provider in Routing.");
        }
        hints
    }

    /// `Err(RampError::RoutingBlocked)` when blocked.
    pub fn ensure(&self) -> Result<()> {
        if self.is_blocked() {
            return Err(RampError::RoutingBlocked(self.hints().join(" ")));
        }
        Ok(())
    }
}

/// Pick a provider of `category` uniformly at random among the enabled ones.
fn pick_provider<R: Rng>(
    toggles: &ProviderToggles,
    category: ProviderCategory,
    rng: &mut R,
) -> Option<&'static str> {
    let enabled = toggles.enabled_in(category);
    if enabled.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..enabled.len());
    Some(enabled[idx].name)
}

/// Build the legs for `from -> to`. Legs whose category has no enabled
/// provider are left out.
pub fn build_path<R: Rng>(
    from: Currency,
    to: Currency,
    toggles: &ProviderToggles,
    rng: &mut R,
) -> Vec<PathStep> {
    let ramp = |rng: &mut R, fee_percent: f64, fixed_fee_amount: f64, fixed_fee_currency: Currency| {
        pick_provider(toggles, ProviderCategory::Ramp, rng).map(|name| PathStep {
            kind: ProviderCategory::Ramp,
            provider_name: name,
            fee_percent,
            fixed_fee_amount,
            fixed_fee_currency,
        })
    };
    let swap = |rng: &mut R, fixed_fee_currency: Currency| {
        pick_provider(toggles, ProviderCategory::Swap, rng).map(|name| PathStep {
            kind: ProviderCategory::Swap,
            provider_name: name,
            fee_percent: 0.15,
            fixed_fee_amount: 0.0,
            fixed_fee_currency,
        })
    };

    let requirement = LegRequirement::for_pair(from, to);
    let mut steps = Vec::with_capacity(2);
    match (from.is_fiat(), to.is_fiat()) {
        (true, false) => {
            steps.extend(ramp(rng, 1.25, 1.5, from));
            if requirement.swap {
                steps.extend(swap(rng, to));
            }
        }
        (false, true) => {
            steps.extend(swap(rng, from));
            steps.extend(ramp(rng, 0.90, 2.0, to));
        }
        _ => steps.extend(swap(rng, from)),
    }
    debug!(
        "Path {} -> {}: {:?}",
        from,
        to,
        steps.iter().map(|s| s.provider_name).collect::<Vec<_>>()
    );
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use strum::IntoEnumIterator;
    use uramp_common::provider::providers_in;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn usd_to_usdc_is_ramp_only() {
        let req = LegRequirement::for_pair(Currency::USD, Currency::USDC);
        assert_eq!(req, LegRequirement { ramp: true, swap: false });
        let req = LegRequirement::for_pair(Currency::USD, Currency::USDT);
        assert!(!req.swap);
    }

    #[test]
    fn usd_to_btc_is_ramp_and_swap() {
        let req = LegRequirement::for_pair(Currency::USD, Currency::BTC);
        assert_eq!(req, LegRequirement { ramp: true, swap: true });
        // EUR has no stable match, so even EUR -> USDC swaps.
        assert!(LegRequirement::for_pair(Currency::EUR, Currency::USDC).swap);
    }

    #[test]
    fn same_side_pairs_are_swap_only() {
        for (from, to) in [
            (Currency::BTC, Currency::ETH),
            (Currency::USDC, Currency::USDT),
            (Currency::USD, Currency::EUR),
        ] {
            assert_eq!(
                LegRequirement::for_pair(from, to),
                LegRequirement { ramp: false, swap: true }
            );
        }
    }

    #[test]
    fn all_disabled_blocks_every_pair() {
        let toggles = ProviderToggles::all_disabled();
        for from in Currency::iter() {
            for to in Currency::iter() {
                let eligibility = Eligibility::evaluate(from, to, &toggles);
                assert!(eligibility.is_blocked(), "{from}->{to}");
                assert!(matches!(
                    eligibility.ensure(),
                    Err(RampError::RoutingBlocked(_))
                ));
            }
        }
    }

    #[test]
    fn all_enabled_blocks_nothing() {
        let toggles = ProviderToggles::all_enabled();
        for from in Currency::iter() {
            for to in Currency::iter() {
                assert!(Eligibility::evaluate(from, to, &toggles).ensure().is_ok());
            }
        }
    }

    #[test]
    fn missing_category_is_named() {
        let mut toggles = ProviderToggles::all_enabled();
        for p in providers_in(ProviderCategory::Swap) {
            toggles.set(p.id, false);
        }
        let stable = Eligibility::evaluate(Currency::USD, Currency::USDC, &toggles);
        assert!(!stable.is_blocked());

        let btc = Eligibility::evaluate(Currency::USD, Currency::BTC, &toggles);
        assert!(btc.missing_swap && !btc.missing_ramp);
        assert_eq!(btc.hints(), vec!["Enable at least one Swap provider in Routing."]);
    }

    #[test]
    fn onramp_path_orders_ramp_then_swap() {
        let toggles = ProviderToggles::all_enabled();
        let steps = build_path(Currency::USD, Currency::BTC, &toggles, &mut rng());
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].kind, ProviderCategory::Ramp);
        assert_eq!(steps[0].fee_label(), "1.25% + 1.50 USD");
        assert_eq!(steps[1].kind, ProviderCategory::Swap);
        assert_eq!(steps[1].fee_label(), "0.15% + 0.00 BTC");
    }

    #[test]
    fn stable_onramp_path_has_single_ramp() {
        let toggles = ProviderToggles::all_enabled();
        let steps = build_path(Currency::USD, Currency::USDC, &toggles, &mut rng());
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].kind, ProviderCategory::Ramp);
    }

    #[test]
    fn offramp_path_orders_swap_then_ramp() {
        let toggles = ProviderToggles::all_enabled();
        let steps = build_path(Currency::ETH, Currency::EUR, &toggles, &mut rng());
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].fee_label(), "0.15% + 0.00 ETH");
        assert_eq!(steps[1].fee_label(), "0.90% + 2.00 EUR");
    }

    #[test]
    fn path_only_uses_enabled_providers() {
        let mut toggles = ProviderToggles::all_disabled();
        toggles.set("noah", true);
        toggles.set("cowswap", true);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let steps = build_path(Currency::USD, Currency::SOL, &toggles, &mut rng);
            let names: Vec<_> = steps.iter().map(|s| s.provider_name).collect();
            assert_eq!(names, vec!["Noah", "CowSwap"]);
        }
    }

    #[test]
    fn legs_without_providers_are_dropped() {
        let mut toggles = ProviderToggles::all_disabled();
        toggles.set("lifi", true);
        let steps = build_path(Currency::USD, Currency::BTC, &toggles, &mut rng());
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].provider_name, "LI.FI");
    }

    #[test]
    fn same_seed_gives_same_path() {
        let toggles = ProviderToggles::all_enabled();
        let a = build_path(Currency::BTC, Currency::GBP, &toggles, &mut rng());
        let b = build_path(Currency::BTC, Currency::GBP, &toggles, &mut rng());
        assert_eq!(a, b);
    }
}
