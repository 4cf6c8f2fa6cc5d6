//! uRamp CLI: simulate fiat/crypto conversions against a fixed rate table,
//! manage which ramp and swap providers are enabled for routing, and browse
//! mock activity. Provider choices are saved to a local JSON store.
//!
//! Usage example (CLI):
//! ```bash
//! uramp quote USD USDC@Ethereum 250
//! uramp convert BTC EUR 0.01 --execute
//! uramp toggle lifi
//! uramp enable monerium direct --api-key k --api-secret s
//! ```
//!
//! Ctrl+C while a simulated call is in flight discards its result.
#![warn(missing_docs)]
mod args;
mod render;

use crate::args::{AmountArgs, Args, Command, EnableCommand};
use clap::Parser;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::io;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use uramp_common::RampError;
use uramp_common::Result;
use uramp_common::currency;
use uramp_common::provider::{ProviderDef, find_provider};
use uramp_engine::{
    ConversionDesk, Credentials, EnableAction, FileStore, Pending, ProviderState, SimulatedApi,
    SimulationConfig, Switchboard,
};

fn main() -> Result<(), RampError> {
    init_logger();
    let args = Args::parse();

    let cancelled = Arc::new(AtomicBool::new(false));
    {
        let cancelled = cancelled.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Discarding pending request...");
            cancelled.store(true, Ordering::SeqCst);
        })
        .map_err(|e| RampError::Io(io::Error::other(e.to_string())))?;
    }

    let config = if args.no_delay {
        SimulationConfig::instant()
    } else {
        SimulationConfig::default()
    };
    let api = SimulatedApi::with_cancel_flag(config, cancelled);
    let store = FileStore::new(args.store.clone());
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let json = args.json;

    match args.command {
        Command::Currencies { query } => {
            let options = currency::search(query.as_deref().unwrap_or(""));
            if json {
                print_json(&options)?;
            } else {
                render::currencies(&options);
            }
        }
        Command::Providers { category } => {
            let listing = Switchboard::open(store)?.listing(category);
            if json {
                print_json(&listing)?;
            } else {
                render::providers(&listing);
            }
        }
        Command::Toggle { id } => {
            let provider = lookup(&id)?;
            let state = Switchboard::open(store)?.toggle(provider.id)?;
            println!("{}", render::switched(provider, state));
        }
        Command::Disable { id } => {
            let provider = lookup(&id)?;
            Switchboard::open(store)?.disable(provider.id)?;
            println!("{}", render::switched(provider, ProviderState::Off));
        }
        Command::Enable { id, model } => {
            let mut board = Switchboard::open(store)?;
            let outcome = board.enable(&id, enable_action(model))?;
            println!("{}", outcome.message);
            println!("{}", render::switched(outcome.provider, ProviderState::On));
        }
        Command::Route(pair) => {
            let desk = ConversionDesk::new(store, api);
            let eligibility = desk.eligibility(&pair.from, &pair.to)?;
            let path = desk.preview_path(&pair.from, &pair.to, &mut rng)?;
            if json {
                #[derive(Serialize)]
                struct RouteView<'a> {
                    eligibility: &'a uramp_engine::Eligibility,
                    path: &'a [uramp_engine::PathStep],
                }
                print_json(&RouteView {
                    eligibility: &eligibility,
                    path: &path,
                })?;
            } else {
                println!("{} -> {}", pair.from, pair.to);
                render::eligibility(&eligibility);
                render::path(&path);
            }
        }
        Command::Quote(amount) => {
            let desk = ConversionDesk::new(store, api);
            if let Some(ticket) = quote(&desk, amount, &mut rng)? {
                if json {
                    print_json(&ticket)?;
                } else {
                    render::ticket(&ticket);
                }
            }
        }
        Command::Convert { pair, execute } => {
            let desk = ConversionDesk::new(store, api);
            let Some(ticket) = quote(&desk, pair, &mut rng)? else {
                return Ok(());
            };
            if !json {
                render::ticket(&ticket);
            }
            if !execute {
                if json {
                    print_json(&ticket)?;
                }
                return Ok(());
            }
            let execution = desk.execute(&ticket)?;
            if let Some(submission) = wait_for(execution.submission, "Submitting order...")? {
                if json {
                    #[derive(Serialize)]
                    struct ConvertView<'a> {
                        ticket: &'a uramp_engine::QuoteTicket,
                        submission: &'a uramp_common::order::Submission,
                    }
                    print_json(&ConvertView {
                        ticket: &ticket,
                        submission: &submission,
                    })?;
                } else {
                    render::submission(&submission);
                }
            }
        }
        Command::Activity => {
            let pending = api.list_activity();
            if let Some(items) = wait_for(pending, "Loading...")? {
                if json {
                    print_json(&items)?;
                } else {
                    render::activity(&items);
                }
            }
        }
    }

    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Request a quote and wait for it. A blocked route comes back as
/// `RampError::RoutingBlocked` carrying the hints.
fn quote(
    desk: &ConversionDesk<FileStore>,
    args: AmountArgs,
    rng: &mut StdRng,
) -> Result<Option<uramp_engine::QuoteTicket>> {
    let pending = desk.request_quote(args.pair.from, args.pair.to, &args.amount, rng)?;
    wait_for(pending, "Loading quote...")
}

/// Wait for a simulated call, noting when Ctrl+C discarded the result.
fn wait_for<T: Send + 'static>(pending: Pending<T>, label: &str) -> Result<Option<T>> {
    info!("{}", label);
    let result = pending.wait()?;
    if result.is_none() {
        warn!("Request cancelled; result discarded");
    }
    Ok(result)
}

fn lookup(id: &str) -> Result<&'static ProviderDef> {
    find_provider(id).ok_or_else(|| RampError::UnknownProvider(id.to_string()))
}

fn enable_action(model: EnableCommand) -> EnableAction {
    match model {
        EnableCommand::Direct {
            api_key,
            api_secret,
            account_id,
        } => EnableAction::Direct(Credentials {
            api_key,
            api_secret,
            account_id,
        }),
        EnableCommand::Link { signup: false } => EnableAction::OAuthGrant,
        EnableCommand::Link { signup: true } => EnableAction::LinkSignup,
        EnableCommand::Signup => EnableAction::EmbeddedSignup,
        EnableCommand::SubAccount { email } => EnableAction::SubAccount { email },
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
