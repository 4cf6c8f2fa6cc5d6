//! Activity history entries.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::order::{ConversionKind, OrderStatus};

/// One row of the activity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    /// Entry identifier.
    pub id: String,
    /// Flavour of the conversion.
    #[serde(rename = "type")]
    pub kind: ConversionKind,
    /// Current status.
    pub status: OrderStatus,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// Free-text summary.
    pub description: String,
}
