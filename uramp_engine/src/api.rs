//! Simulated backend.
//!
//! Every call runs on its own thread, sleeps for a fixed delay and then
//! delivers its result through a `crossbeam_channel`. The caller holds a
//! [`Pending`] handle with its own cancellation flag (the "view went away"
//! signal). Handles also observe the flag of the [`SimulatedApi`] that made
//! them, which a Ctrl+C handler can set to drop everything in flight. Once
//! either flag is set, waiting returns `None` and any late result is dropped.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

use chrono::{Duration as TimeDelta, Utc};
use crossbeam_channel::{Receiver, RecvTimeoutError, bounded};
use log::{debug, info};
use uramp_common::activity::ActivityItem;
use uramp_common::order::{ConversionKind, OrderStatus, Submission};
use uramp_common::{Currency, Quote, RampError, Result};

use crate::model::quote::QuoteEngine;

/// How often a waiting caller re-checks the cancellation flag.
const POLL_INTERVAL_MS: u64 = 50;

/// Artificial latencies of the simulated calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Delay before a quote is delivered.
    pub quote_delay: Duration,
    /// Delay before a submission is acknowledged.
    pub submit_delay: Duration,
    /// Delay before the activity list is delivered.
    pub activity_delay: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            quote_delay: Duration::from_millis(300),
            submit_delay: Duration::from_millis(800),
            activity_delay: Duration::from_millis(400),
        }
    }
}

impl SimulationConfig {
    /// No artificial latency at all.
    pub fn instant() -> Self {
        Self {
            quote_delay: Duration::ZERO,
            submit_delay: Duration::ZERO,
            activity_delay: Duration::ZERO,
        }
    }
}

/// Result of a simulated call that may not have arrived yet.
pub struct Pending<T> {
    rx: Receiver<T>,
    cancelled: Arc<AtomicBool>,
    api_cancelled: Arc<AtomicBool>,
}

impl<T: Send + 'static> Pending<T> {
    fn spawn<F>(delay: Duration, api_cancelled: Arc<AtomicBool>, job: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = bounded(1);
        thread::spawn(move || {
            thread::sleep(delay);
            // The receiver may already be gone; a late result is simply dropped.
            let _ = tx.send(job());
        });
        Self {
            rx,
            cancelled: Arc::new(AtomicBool::new(false)),
            api_cancelled,
        }
    }

    /// Transform the result once it arrives, keeping the same cancellation flags.
    pub fn map<U, F>(self, f: F) -> Pending<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let (tx, rx) = bounded(1);
        let source = self.rx;
        thread::spawn(move || {
            if let Ok(value) = source.recv() {
                let _ = tx.send(f(value));
            }
        });
        Pending {
            rx,
            cancelled: self.cancelled,
            api_cancelled: self.api_cancelled,
        }
    }

    /// Discard this result whenever it arrives. Other handles are unaffected.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// `true` once this handle or its API has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst) || self.api_cancelled.load(Ordering::SeqCst)
    }

    /// Block until the result arrives or the handle is cancelled.
    ///
    /// Returns `Ok(None)` when cancelled, even if the result is already queued.
    pub fn wait(self) -> Result<Option<T>> {
        let poll = Duration::from_millis(POLL_INTERVAL_MS);
        loop {
            if self.is_cancelled() {
                debug!("Pending request cancelled; discarding result");
                return Ok(None);
            }
            match self.rx.recv_timeout(poll) {
                Ok(value) if self.is_cancelled() => {
                    drop(value);
                    debug!("Late result discarded after cancellation");
                    return Ok(None);
                }
                Ok(value) => return Ok(Some(value)),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(RampError::ChannelRecv(
                        "simulated worker exited without a result".to_string(),
                    ));
                }
            }
        }
    }
}

/// Fake quote, submit and activity endpoints.
#[derive(Debug, Clone)]
pub struct SimulatedApi {
    config: SimulationConfig,
    cancelled: Arc<AtomicBool>,
}

impl SimulatedApi {
    /// API with its own API-wide cancellation flag.
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_cancel_flag(config, Arc::new(AtomicBool::new(false)))
    }

    /// API whose handles observe an externally owned flag, e.g. one set by a
    /// Ctrl+C handler.
    pub fn with_cancel_flag(config: SimulationConfig, cancelled: Arc<AtomicBool>) -> Self {
        Self { config, cancelled }
    }

    /// Latencies in use.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Price `amount` of `from` in `to`.
    pub fn quote(&self, from: Currency, to: Currency, amount: &str) -> Pending<Quote> {
        let amount = amount.to_string();
        debug!("Requesting quote {} {} -> {}", amount, from, to);
        Pending::spawn(self.config.quote_delay, self.cancelled.clone(), move || {
            QuoteEngine::quote(from, to, &amount)
        })
    }

    /// Submit a fiat -> crypto order.
    pub fn submit_onramp(&self, fiat: Currency, amount: &str, crypto: Currency) -> Pending<Submission> {
        self.submit(ConversionKind::OnRamp, fiat, crypto, amount)
    }

    /// Submit a crypto -> fiat order.
    pub fn submit_offramp(&self, crypto: Currency, amount: &str, fiat: Currency) -> Pending<Submission> {
        self.submit(ConversionKind::OffRamp, crypto, fiat, amount)
    }

    /// Submit a swap order.
    pub fn submit_swap(&self, from: Currency, to: Currency, amount: &str) -> Pending<Submission> {
        self.submit(ConversionKind::Swap, from, to, amount)
    }

    fn submit(
        &self,
        kind: ConversionKind,
        from: Currency,
        to: Currency,
        amount: &str,
    ) -> Pending<Submission> {
        info!("Submitting {} order: {} {} -> {}", kind, amount, from, to);
        Pending::spawn(self.config.submit_delay, self.cancelled.clone(), move || {
            let submission = Submission::pending();
            debug!("Order {} accepted", submission.id);
            submission
        })
    }

    /// Recent activity. The list is fixed.
    pub fn list_activity(&self) -> Pending<Vec<ActivityItem>> {
        Pending::spawn(self.config.activity_delay, self.cancelled.clone(), || {
            let now = Utc::now();
            vec![
                ActivityItem {
                    id: "a1".to_string(),
                    kind: ConversionKind::OnRamp,
                    status: OrderStatus::Completed,
                    created_at: now - TimeDelta::days(1),
                    description: "Bought 250 USDC with 250 USD".to_string(),
                },
                ActivityItem {
                    id: "a2".to_string(),
                    kind: ConversionKind::Swap,
                    status: OrderStatus::Pending,
                    created_at: now,
                    description: "Swapping 0.01 BTC to USDC".to_string(),
                },
            ]
        })
    }
}
