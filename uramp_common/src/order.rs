//! Order flavours and submission receipts.
//!
//! A conversion is an on-ramp, an off-ramp or a swap depending on which side of
//! the pair is fiat. The flavour picks the submit call used to execute it.
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use uuid::Uuid;

use crate::currency::Currency;

/// Flavour of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConversionKind {
    /// Fiat to crypto.
    OnRamp,
    /// Crypto to fiat.
    OffRamp,
    /// Anything else, including fiat to fiat.
    Swap,
}

impl ConversionKind {
    /// Pick the flavour for a `from -> to` pair.
    pub fn for_pair(from: Currency, to: Currency) -> Self {
        match (from.is_fiat(), to.is_fiat()) {
            (true, false) => ConversionKind::OnRamp,
            (false, true) => ConversionKind::OffRamp,
            _ => ConversionKind::Swap,
        }
    }
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    /// Accepted, not settled.
    Pending,
    /// Settled.
    Completed,
    /// Rejected or reverted.
    Failed,
}

/// Receipt returned by a submit call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Order identifier.
    pub id: Uuid,
    /// Always `Pending` when freshly submitted.
    pub status: OrderStatus,
}

impl Submission {
    /// New pending receipt with a random identifier.
    pub fn pending() -> Self {
        Self {
            id: Uuid::new_v4(),
            status: OrderStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flavour_follows_fiat_side() {
        assert_eq!(
            ConversionKind::for_pair(Currency::USD, Currency::BTC),
            ConversionKind::OnRamp
        );
        assert_eq!(
            ConversionKind::for_pair(Currency::ETH, Currency::EUR),
            ConversionKind::OffRamp
        );
        assert_eq!(
            ConversionKind::for_pair(Currency::ETH, Currency::USDC),
            ConversionKind::Swap
        );
        assert_eq!(
            ConversionKind::for_pair(Currency::USD, Currency::EUR),
            ConversionKind::Swap
        );
    }

    #[test]
    fn fresh_submissions_are_pending_and_unique() {
        let a = Submission::pending();
        let b = Submission::pending();
        assert_eq!(a.status, OrderStatus::Pending);
        assert_ne!(a.id, b.id);
        assert_eq!(ConversionKind::OnRamp.to_string(), "onramp");
    }
}
