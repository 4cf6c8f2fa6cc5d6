//! Route legs shown under a quote.
use serde::Serialize;
use uramp_common::{Currency, ProviderCategory};

/// One leg of a route: which provider runs it and what it charges.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStep {
    /// Ramp or swap leg.
    pub kind: ProviderCategory,
    /// Display name of the chosen provider.
    pub provider_name: &'static str,
    /// Percentage fee, e.g. `1.25` for 1.25%.
    pub fee_percent: f64,
    /// Flat fee on top of the percentage.
    pub fixed_fee_amount: f64,
    /// Currency the flat fee is charged in.
    pub fixed_fee_currency: Currency,
}

impl PathStep {
    /// `1.25% + 1.50 USD`.
    pub fn fee_label(&self) -> String {
        format!(
            "{:.2}% + {:.2} {}",
            self.fee_percent, self.fixed_fee_amount, self.fixed_fee_currency
        )
    }
}

/// Title of the step at `index` in a path of `len` steps.
///
/// A leading ramp is an on-ramp, a trailing ramp an off-ramp.
pub fn step_title(step: &PathStep, index: usize, len: usize) -> &'static str {
    match step.kind {
        ProviderCategory::Swap => "Swap",
        ProviderCategory::Ramp if index == 0 => "On Ramp",
        ProviderCategory::Ramp if index + 1 == len => "Off Ramp",
        ProviderCategory::Ramp => "Ramp",
    }
}
