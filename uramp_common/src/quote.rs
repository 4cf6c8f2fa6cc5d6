//! Quote payload shared by the engine and the CLI.
//!
//! Amounts are carried as two-decimal strings exactly as they are shown to the
//! user; the engine is the only place that does arithmetic on them.
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::Currency;
use crate::error::RampError;

/// A priced conversion offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Quote identifier.
    pub id: Uuid,
    /// Currency paid in.
    pub source_currency: Currency,
    /// Currency received.
    pub destination_currency: Currency,
    /// Amount paid in, two decimals.
    pub source_amount: String,
    /// Amount received after fees, two decimals.
    pub destination_amount: String,
    /// Fee in destination units, two decimals.
    pub fee_amount: String,
    /// Informational expiry; nothing enforces it.
    pub expires_at: DateTime<Utc>,
}

impl Quote {
    /// Encode the quote to pretty JSON.
    pub fn to_json(&self) -> Result<String, RampError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} {} (fee {})",
            self.source_amount,
            self.source_currency,
            self.destination_amount,
            self.destination_currency,
            self.fee_amount
        )
    }
}
