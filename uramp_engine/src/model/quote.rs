//! Quote pricing.
//!
//! Rates come from a fixed table of `from-to` pairs; unknown pairs convert at
//! 1:1. A flat 1% fee with a floor of one destination unit is taken out of the
//! gross amount, and the net amount never goes below zero. Amounts that do not
//! parse, are not finite, or are negative price as zero.

use chrono::{DateTime, Duration, Utc};
use log::debug;
use uramp_common::{Currency, Quote};
use uuid::Uuid;

/// Share of the gross destination amount taken as fee.
pub const FEE_RATE: f64 = 0.01;
/// Smallest fee charged, in destination units.
pub const MIN_FEE: f64 = 1.0;
/// Lifetime advertised on every quote.
pub const QUOTE_TTL_SECS: i64 = 60;

use Currency::*;

/// Fixed conversion rates. Pairs not listed convert 1:1.
const RATE_TABLE: &[(Currency, Currency, f64)] = &[
    (USD, USDC, 1.0),
    (USD, USDT, 1.0),
    (USD, BTC, 1.0 / 60_000.0),
    (USD, ETH, 1.0 / 3_000.0),
    (USD, SOL, 1.0 / 150.0),
    (USDC, USD, 1.0),
    (USDT, USD, 1.0),
    (BTC, USD, 60_000.0),
    (ETH, USD, 3_000.0),
    (SOL, USD, 150.0),
    (USDC, USDT, 1.0),
    (USDT, USDC, 1.0),
    (BTC, USDC, 60_000.0),
    (USDC, BTC, 1.0 / 60_000.0),
    (ETH, USDC, 3_000.0),
    (USDC, ETH, 1.0 / 3_000.0),
    (SOL, USDC, 150.0),
    (USDC, SOL, 1.0 / 150.0),
];

/// Gross, fee and net amounts for one conversion, unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    /// Amount paid in after coercion.
    pub source: f64,
    /// `source * rate`.
    pub gross: f64,
    /// `max(MIN_FEE, gross * FEE_RATE)`.
    pub fee: f64,
    /// `max(0, gross - fee)`.
    pub net: f64,
}

/// Static quote engine.
pub struct QuoteEngine;

impl QuoteEngine {
    /// Rate for `from -> to`, 1.0 when the pair is not in the table.
    pub fn rate(from: Currency, to: Currency) -> f64 {
        RATE_TABLE
            .iter()
            .find(|(f, t, _)| *f == from && *t == to)
            .map(|(_, _, rate)| *rate)
            .unwrap_or(1.0)
    }

    /// Coerce a user-typed amount. Anything but a finite positive number becomes 0.
    pub fn parse_amount(raw: &str) -> f64 {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(0.0)
    }

    /// Apply rate and fee to an already coerced amount.
    pub fn price(source: f64, rate: f64) -> Pricing {
        let gross = source * rate;
        let fee = (gross * FEE_RATE).max(MIN_FEE);
        let net = (gross - fee).max(0.0);
        Pricing {
            source,
            gross,
            fee,
            net,
        }
    }

    /// Build a quote with expiry measured from `now`.
    pub fn quote_at(from: Currency, to: Currency, raw_amount: &str, now: DateTime<Utc>) -> Quote {
        let rate = Self::rate(from, to);
        let pricing = Self::price(Self::parse_amount(raw_amount), rate);
        debug!(
            "Pricing {} {} -> {} at rate {}: gross={} fee={} net={}",
            pricing.source, from, to, rate, pricing.gross, pricing.fee, pricing.net
        );

        Quote {
            id: Uuid::new_v4(),
            source_currency: from,
            destination_currency: to,
            source_amount: format!("{:.2}", pricing.source),
            destination_amount: format!("{:.2}", pricing.net),
            fee_amount: format!("{:.2}", pricing.fee),
            expires_at: now + Duration::seconds(QUOTE_TTL_SECS),
        }
    }

    /// Build a quote expiring a minute from now.
    pub fn quote(from: Currency, to: Currency, raw_amount: &str) -> Quote {
        Self::quote_at(from, to, raw_amount, Utc::now())
    }
}
