//! Text output for the CLI. JSON output goes straight through `serde_json` in `main`.
use chrono::Local;
use uramp_common::activity::ActivityItem;
use uramp_common::currency::CurrencyOption;
use uramp_common::order::Submission;
use uramp_common::provider::{ProviderCategory, ProviderDef};
use uramp_engine::model::path::step_title;
use uramp_engine::{Eligibility, PathStep, ProviderState, ProviderStatus, QuoteTicket};

pub fn currencies(options: &[CurrencyOption]) {
    for option in options {
        println!("{:<16} {}", option.key, option.label);
    }
}

pub fn providers(listing: &[ProviderStatus]) {
    for section in [ProviderCategory::Ramp, ProviderCategory::Swap] {
        let rows: Vec<_> = listing
            .iter()
            .filter(|s| s.provider.category == section)
            .collect();
        if rows.is_empty() {
            continue;
        }
        println!("{}", if section == ProviderCategory::Ramp { "Ramp" } else { "Swap" });
        for row in rows {
            let p = row.provider;
            println!(
                "  [{:<3}] {:<10} {:<14} {}",
                row.state.to_string(),
                p.id,
                p.name,
                p.info.unwrap_or("")
            );
            if row.state == ProviderState::Off {
                for model in row.enable_models {
                    println!("        model {} ({}): {}", model.number(), model, model.description());
                }
            }
        }
    }
}

/// Confirmation line for a provider state change.
pub fn switched(provider: &ProviderDef, state: ProviderState) -> String {
    format!("{} is now {}", provider.name, state)
}

pub fn eligibility(eligibility: &Eligibility) {
    let req = eligibility.requirement;
    let legs = match (req.ramp, req.swap) {
        (true, true) => "ramp + swap",
        (true, false) => "ramp only",
        _ => "swap only",
    };
    println!("Legs: {}", legs);
    for hint in eligibility.hints() {
        println!("! {}", hint);
    }
}

pub fn path(steps: &[PathStep]) {
    if steps.is_empty() {
        return;
    }
    let pills: Vec<String> = steps
        .iter()
        .enumerate()
        .map(|(idx, step)| {
            format!(
                "{} • {} • {}",
                step_title(step, idx, steps.len()),
                step.provider_name,
                step.fee_label()
            )
        })
        .collect();
    println!("Path: {}", pills.join("  ->  "));
}

pub fn ticket(ticket: &QuoteTicket) {
    println!("{} -> {} ({})", ticket.from, ticket.to, ticket.kind);
    println!("Quote: {}", ticket.quote);
    println!(
        "Quote id {} expires {}",
        ticket.quote.id,
        ticket.quote.expires_at.with_timezone(&Local).format("%H:%M:%S")
    );
    path(&ticket.path);
}

pub fn submission(submission: &Submission) {
    println!("Submitted: {} ({})", submission.id, submission.status);
}

pub fn activity(items: &[ActivityItem]) {
    if items.is_empty() {
        println!("No activity yet.");
        return;
    }
    for item in items {
        println!(
            "{:<8} {:<10} {}  {}",
            item.kind,
            item.status,
            item.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            item.description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uramp_common::provider::find_provider;

    #[test]
    fn switched_uses_display_name() {
        let lifi = find_provider("lifi").unwrap();
        assert_eq!(switched(lifi, ProviderState::Off), "LI.FI is now OFF");
        let coinsph = find_provider("coinsph").unwrap();
        assert_eq!(switched(coinsph, ProviderState::On), "Coins.ph is now ON");
    }
}
