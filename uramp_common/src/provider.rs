//! Static provider registry and the enable models ramp providers offer.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Leg a provider can serve.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[value(rename_all = "lower")]
pub enum ProviderCategory {
    /// Fiat <-> crypto.
    Ramp,
    /// Crypto <-> crypto.
    Swap,
}

/// How a ramp provider gets switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
pub enum EnableModel {
    /// The user pastes API credentials for an account they already hold.
    #[strum(to_string = "Direct")]
    Direct,
    /// The user links an existing account (OAuth grant) or signs up first.
    #[strum(to_string = "Multi-Party Model 1")]
    Link,
    /// The user signs up through an embedded/redirected provider flow.
    #[strum(to_string = "Multi-Party Model 2")]
    EmbeddedSignup,
    /// A sub-account is provisioned under the master business account.
    #[strum(to_string = "Multi-Party Model 3")]
    SubAccount,
}

impl EnableModel {
    /// Model number as shown in the routing page (1-4).
    pub fn number(self) -> u8 {
        match self {
            EnableModel::Direct => 1,
            EnableModel::Link => 2,
            EnableModel::EmbeddedSignup => 3,
            EnableModel::SubAccount => 4,
        }
    }

    /// One-line explanation of the model.
    pub fn description(self) -> &'static str {
        match self {
            EnableModel::Direct => {
                "Link your own provider account with API credentials; uRamp orchestrates transfers using it."
            }
            EnableModel::Link => {
                "Authenticate an existing provider account via OAuth, or sign up for one first."
            }
            EnableModel::EmbeddedSignup => {
                "Sign up on the provider through an embedded flow; the business account orchestrates payouts later."
            }
            EnableModel::SubAccount => {
                "A sub-account is provisioned under the master business account; no end-user credentials needed."
            }
        }
    }
}

/// Static description of a liquidity or payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderDef {
    /// Storage identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Leg the provider serves.
    pub category: ProviderCategory,
    /// Rails and notes shown under the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<&'static str>,
}

impl ProviderDef {
    /// Enable models the provider offers. Swap providers offer none; they toggle directly.
    pub fn enable_models(&self) -> &'static [EnableModel] {
        use EnableModel::*;
        match self.id {
            "monerium" => &[Direct, SubAccount],
            "pdax" => &[Link],
            "coinsph" => &[Direct, Link],
            "revolut" => &[EmbeddedSignup],
            "noah" => &[SubAccount],
            "brla" => &[EmbeddedSignup],
            "straitsx" => &[SubAccount],
            _ => &[],
        }
    }

    /// `true` when `model` is one of [`Self::enable_models`].
    pub fn supports(&self, model: EnableModel) -> bool {
        self.enable_models().contains(&model)
    }
}

/// Every known provider, ramp providers first.
pub const PROVIDERS: &[ProviderDef] = &[
    ProviderDef {
        id: "monerium",
        name: "Monerium",
        category: ProviderCategory::Ramp,
        info: Some("Direct + Multi-Party; SEPA CT / SCT Inst"),
    },
    ProviderDef {
        id: "pdax",
        name: "PDAX",
        category: ProviderCategory::Ramp,
        info: Some("Multi-Party; InstaPay / PESONet"),
    },
    ProviderDef {
        id: "coinsph",
        name: "Coins.ph",
        category: ProviderCategory::Ramp,
        info: Some("Direct + Multi-Party; InstaPay / PESONet / Wallet"),
    },
    ProviderDef {
        id: "brla",
        name: "BRLA",
        category: ProviderCategory::Ramp,
        info: Some("PIX"),
    },
    ProviderDef {
        id: "straitsx",
        name: "StraitsX",
        category: ProviderCategory::Ramp,
        info: Some("Multi-Party; FAST / PayNow / Virtual Accounts"),
    },
    ProviderDef {
        id: "noah",
        name: "Noah",
        category: ProviderCategory::Ramp,
        info: Some("Multi-Party; SEPA / ACH / Fedwire / RTP / PIX / InstaPay / UPI"),
    },
    ProviderDef {
        id: "revolut",
        name: "Revolut Ramp",
        category: ProviderCategory::Ramp,
        info: Some("Onramp only"),
    },
    ProviderDef {
        id: "lifi",
        name: "LI.FI",
        category: ProviderCategory::Swap,
        info: None,
    },
    ProviderDef {
        id: "cowswap",
        name: "CowSwap",
        category: ProviderCategory::Swap,
        info: None,
    },
    ProviderDef {
        id: "1inch",
        name: "1inch",
        category: ProviderCategory::Swap,
        info: None,
    },
];

/// Look up a provider by identifier.
pub fn find_provider(id: &str) -> Option<&'static ProviderDef> {
    PROVIDERS.iter().find(|p| p.id == id)
}

/// Providers serving `category`, in registry order.
pub fn providers_in(category: ProviderCategory) -> impl Iterator<Item = &'static ProviderDef> {
    PROVIDERS.iter().filter(move |p| p.category == category)
}
