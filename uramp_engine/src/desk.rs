//! Conversion desk: quote, route and execute a single conversion.
//!
//! Toggles are re-read from the store on every call, so a change made by
//! another process is picked up on the next quote or execution. The route is
//! chosen once, when the quote is requested, and travels with the
//! [`QuoteTicket`] into execution.

use log::info;
use rand::Rng;
use serde::Serialize;
use uramp_common::order::{ConversionKind, Submission};
use uramp_common::{CurrencySelection, Quote, Result};

use crate::api::{Pending, SimulatedApi};
use crate::model::path::PathStep;
use crate::routing::{Eligibility, build_path};
use crate::store::KeyValueStore;
use crate::toggles::ProviderToggles;

/// A quote together with the route it was priced for.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteTicket {
    /// On-ramp, off-ramp or swap.
    pub kind: ConversionKind,
    /// Source selection, chain included.
    pub from: CurrencySelection,
    /// Destination selection, chain included.
    pub to: CurrencySelection,
    /// Amount as typed by the user.
    pub amount: String,
    /// Priced offer.
    pub quote: Quote,
    /// Legs and providers chosen at quote time.
    pub path: Vec<PathStep>,
}

/// A submitted conversion and the route it runs along.
pub struct Execution {
    /// Legs taken, copied from the ticket.
    pub route: Vec<PathStep>,
    /// Order acknowledgement.
    pub submission: Pending<Submission>,
}

/// Front door for conversions.
pub struct ConversionDesk<S: KeyValueStore> {
    store: S,
    api: SimulatedApi,
}

impl<S: KeyValueStore> ConversionDesk<S> {
    /// Desk reading toggles from `store` and calling `api`.
    pub fn new(store: S, api: SimulatedApi) -> Self {
        Self { store, api }
    }

    /// Toggles as currently saved.
    pub fn toggles(&self) -> Result<ProviderToggles> {
        ProviderToggles::load(&self.store)
    }

    /// Can the enabled providers serve `from -> to`?
    pub fn eligibility(&self, from: &CurrencySelection, to: &CurrencySelection) -> Result<Eligibility> {
        Ok(Eligibility::evaluate(from.code, to.code, &self.toggles()?))
    }

    /// Preview a route without quoting.
    pub fn preview_path<R: Rng>(
        &self,
        from: &CurrencySelection,
        to: &CurrencySelection,
        rng: &mut R,
    ) -> Result<Vec<PathStep>> {
        Ok(build_path(from.code, to.code, &self.toggles()?, rng))
    }

    /// Request a quote. Refused with `RampError::RoutingBlocked` when a needed
    /// leg has no enabled provider.
    pub fn request_quote<R: Rng>(
        &self,
        from: CurrencySelection,
        to: CurrencySelection,
        amount: &str,
        rng: &mut R,
    ) -> Result<Pending<QuoteTicket>> {
        let toggles = self.toggles()?;
        Eligibility::evaluate(from.code, to.code, &toggles).ensure()?;

        let kind = ConversionKind::for_pair(from.code, to.code);
        let path = build_path(from.code, to.code, &toggles, rng);
        let amount = amount.to_string();
        let pending = self.api.quote(from.code, to.code, &amount);
        Ok(pending.map(move |quote| QuoteTicket {
            kind,
            from,
            to,
            amount,
            quote,
            path,
        }))
    }

    /// Execute a quoted conversion along the ticket's route.
    ///
    /// Eligibility is checked again against the current toggles; the route is
    /// never re-picked.
    pub fn execute(&self, ticket: &QuoteTicket) -> Result<Execution> {
        let (from, to) = (ticket.from.code, ticket.to.code);
        self.eligibility(&ticket.from, &ticket.to)?.ensure()?;

        info!(
            "Executing quote {} via {}",
            ticket.quote.id,
            ticket
                .path
                .iter()
                .map(|s| s.provider_name)
                .collect::<Vec<_>>()
                .join(" -> ")
        );
        let submission = match ticket.kind {
            ConversionKind::OnRamp => self.api.submit_onramp(from, &ticket.amount, to),
            ConversionKind::OffRamp => self.api.submit_offramp(from, &ticket.amount, to),
            ConversionKind::Swap => self.api.submit_swap(from, to, &ticket.amount),
        };
        Ok(Execution {
            route: ticket.path.clone(),
            submission,
        })
    }
}
