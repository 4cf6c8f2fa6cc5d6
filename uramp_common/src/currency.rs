//! Currency codes, chains and selections shared by the engine and the CLI.
//!
//! Codes are split into five fiat and five crypto currencies. Two of the crypto
//! codes are tokens issued on several chains; a [`CurrencySelection`] pins one
//! of those chains. The [`catalog`] lists every selectable option the way the
//! currency picker shows them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::RampError;

/// Whether a currency lives off-chain or on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CurrencyKind {
    /// Government-issued money.
    Fiat,
    /// On-chain asset.
    Crypto,
}

/// Set of supported currency codes.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
    PartialOrd,
    Ord,
)]
#[strum(ascii_case_insensitive)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    SGD,
    AUD,
    USDC,
    USDT,
    BTC,
    ETH,
    SOL,
}

/// Fiat codes in display order.
pub const FIAT_CURRENCIES: [Currency; 5] = [
    Currency::USD,
    Currency::EUR,
    Currency::GBP,
    Currency::SGD,
    Currency::AUD,
];

/// Crypto codes in display order.
pub const CRYPTO_CURRENCIES: [Currency; 5] = [
    Currency::USDC,
    Currency::USDT,
    Currency::BTC,
    Currency::ETH,
    Currency::SOL,
];

impl Currency {
    /// Parse a code, reporting unknown codes as `RampError::UnknownCurrency`.
    pub fn parse_code(raw: &str) -> Result<Self, RampError> {
        let trimmed = raw.trim();
        trimmed
            .parse::<Self>()
            .map_err(|_| RampError::UnknownCurrency(trimmed.to_string()))
    }

    /// Fiat or crypto.
    pub fn kind(self) -> CurrencyKind {
        if FIAT_CURRENCIES.contains(&self) {
            CurrencyKind::Fiat
        } else {
            CurrencyKind::Crypto
        }
    }

    /// `true` for the five fiat codes.
    pub fn is_fiat(self) -> bool {
        self.kind() == CurrencyKind::Fiat
    }

    /// `true` for the five crypto codes.
    pub fn is_crypto(self) -> bool {
        self.kind() == CurrencyKind::Crypto
    }

    /// Chains a token is issued on. Empty for fiat and for native coins.
    pub fn token_chains(self) -> &'static [Chain] {
        match self {
            Currency::USDC => &[Chain::Ethereum, Chain::Solana, Chain::Polygon],
            Currency::USDT => &[Chain::Ethereum, Chain::Tron, Chain::Polygon],
            _ => &[],
        }
    }

    /// `true` when the currency exists on more than one chain.
    pub fn is_token(self) -> bool {
        !self.token_chains().is_empty()
    }
}

/// Chains that token currencies can be selected on.
#[allow(missing_docs)]
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Display, EnumString, EnumIter, Hash, Eq, PartialEq,
)]
#[strum(ascii_case_insensitive)]
pub enum Chain {
    #[strum(to_string = "Ethereum", serialize = "ETH")]
    Ethereum,
    #[strum(to_string = "Solana", serialize = "SOL")]
    Solana,
    #[strum(to_string = "Polygon", serialize = "POLY")]
    Polygon,
    #[strum(to_string = "Tron", serialize = "TRON")]
    Tron,
}

impl Chain {
    /// Badge text used next to token labels.
    pub fn short_code(self) -> &'static str {
        match self {
            Chain::Ethereum => "ETH",
            Chain::Solana => "SOL",
            Chain::Polygon => "POLY",
            Chain::Tron => "TRON",
        }
    }
}

/// A currency code plus the chain it is held on, when that matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencySelection {
    /// Selected currency.
    pub code: Currency,
    /// Chain for token currencies; always `None` for fiat and native coins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<Chain>,
}

impl CurrencySelection {
    /// Build a selection, rejecting chains the currency is not issued on.
    pub fn new(code: Currency, chain: Option<Chain>) -> Result<Self, RampError> {
        if let Some(chain) = chain {
            if !code.token_chains().contains(&chain) {
                return Err(RampError::UnsupportedChain {
                    currency: code,
                    chain,
                });
            }
        }
        Ok(Self { code, chain })
    }

    /// Selection without a chain.
    pub fn plain(code: Currency) -> Self {
        Self { code, chain: None }
    }

    /// Fiat or crypto, derived from the code.
    pub fn kind(&self) -> CurrencyKind {
        self.code.kind()
    }

    /// Human label, e.g. `USD` or `USDC on ETH`.
    pub fn label(&self) -> String {
        match self.chain {
            Some(chain) if self.code.is_crypto() => {
                format!("{} on {}", self.code, chain.short_code())
            }
            _ => self.code.to_string(),
        }
    }
}

impl From<Currency> for CurrencySelection {
    fn from(code: Currency) -> Self {
        Self::plain(code)
    }
}

impl fmt::Display for CurrencySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Parses `CODE` or `CODE@Chain` (chain names and short codes both work).
impl FromStr for CurrencySelection {
    type Err = RampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('@') {
            Some((code, chain)) => {
                let code = Currency::parse_code(code)?;
                let chain = chain
                    .trim()
                    .parse::<Chain>()
                    .map_err(|_| RampError::UnknownChain(chain.trim().to_string()))?;
                Self::new(code, Some(chain))
            }
            None => Ok(Self::plain(Currency::parse_code(s)?)),
        }
    }
}

/// One entry of the currency picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyOption {
    /// Stable key, e.g. `USD` or `USDC-Ethereum`.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Selection produced when the option is picked.
    pub selection: CurrencySelection,
    /// Text the search box matches against.
    #[serde(skip)]
    pub searchable: String,
}

/// All selectable options: fiat first, then crypto with one option per token chain.
pub fn catalog() -> Vec<CurrencyOption> {
    let mut options = Vec::new();
    for code in Currency::iter() {
        let chains = code.token_chains();
        if chains.is_empty() {
            options.push(CurrencyOption {
                key: code.to_string(),
                label: code.to_string(),
                selection: CurrencySelection::plain(code),
                searchable: code.to_string(),
            });
            continue;
        }
        for &chain in chains {
            let selection = CurrencySelection {
                code,
                chain: Some(chain),
            };
            options.push(CurrencyOption {
                key: format!("{}-{}", code, chain),
                label: selection.label(),
                selection,
                searchable: format!("{} {}", code, chain),
            });
        }
    }
    options
}

/// Case-insensitive substring search over the catalog. A blank query returns everything.
pub fn search(query: &str) -> Vec<CurrencyOption> {
    let q = query.trim().to_lowercase();
    let all = catalog();
    if q.is_empty() {
        return all;
    }
    all.into_iter()
        .filter(|o| o.searchable.to_lowercase().contains(&q))
        .collect()
}
