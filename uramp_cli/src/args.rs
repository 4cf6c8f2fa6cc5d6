//! Command-line arguments for the uRamp CLI.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use uramp_common::{CurrencySelection, ProviderCategory};

/// Default location of the local store.
pub const DEFAULT_STORE: &str = "uramp-storage.json";

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "uramp", version, about, long_about = None)]
pub struct Args {
    /// JSON file holding provider toggles and saved credentials.
    #[arg(long, global = true, env = "URAMP_STORE", default_value = DEFAULT_STORE)]
    pub store: PathBuf,

    /// Skip the artificial latency of simulated calls.
    #[arg(long, global = true)]
    pub no_delay: bool,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Seed for provider picks; random when omitted.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// What to do.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List selectable currencies, optionally filtered.
    Currencies {
        /// Case-insensitive search text, e.g. `usdc` or `polygon`.
        query: Option<String>,
    },
    /// Show every provider and whether it is enabled.
    Providers {
        /// Only show one category.
        #[arg(long, value_enum)]
        category: Option<ProviderCategory>,
    },
    /// Flip a provider. Ramp providers can only be flipped OFF.
    Toggle {
        /// Provider id, e.g. `lifi`.
        id: String,
    },
    /// Switch a ramp provider ON through one of its enable models.
    Enable {
        /// Provider id, e.g. `monerium`.
        id: String,
        #[command(subcommand)]
        model: EnableCommand,
    },
    /// Switch a provider OFF.
    Disable {
        /// Provider id.
        id: String,
    },
    /// Show the legs and providers a pair would route through.
    Route(PairArgs),
    /// Price a conversion.
    Quote(AmountArgs),
    /// Price a conversion and optionally execute it.
    Convert {
        #[command(flatten)]
        pair: AmountArgs,
        /// Submit the order after quoting.
        #[arg(long)]
        execute: bool,
    },
    /// Show recent activity.
    Activity,
}

/// Enable model chosen for `enable`.
#[derive(Debug, Subcommand)]
pub enum EnableCommand {
    /// Model 1: save API credentials.
    Direct {
        /// API key.
        #[arg(long)]
        api_key: String,
        /// API secret.
        #[arg(long)]
        api_secret: String,
        /// Account id.
        #[arg(long, default_value = "")]
        account_id: String,
    },
    /// Model 2: link an existing account, or sign up when `--signup` is given.
    Link {
        /// No account yet; sign up instead of granting OAuth access.
        #[arg(long)]
        signup: bool,
    },
    /// Model 3: embedded signup.
    Signup,
    /// Model 4: create a sub-account under the business account.
    SubAccount {
        /// End-user email.
        #[arg(long)]
        email: String,
    },
}

/// Source and destination, e.g. `USD USDC@Ethereum`.
#[derive(Debug, ClapArgs)]
pub struct PairArgs {
    /// Currency paid in (`CODE` or `CODE@Chain`).
    pub from: CurrencySelection,
    /// Currency received (`CODE` or `CODE@Chain`).
    pub to: CurrencySelection,
}

/// Pair plus an amount of the source currency.
#[derive(Debug, ClapArgs)]
pub struct AmountArgs {
    #[command(flatten)]
    pub pair: PairArgs,
    /// Amount of `from`; anything that is not a positive number prices as 0.
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uramp_common::{Chain, Currency};

    #[test]
    fn parses_quote_with_chain_and_global_flags() {
        let args = Args::try_parse_from([
            "uramp", "quote", "usd", "USDC@Polygon", "250", "--no-delay", "--seed", "4",
        ])
        .unwrap();
        assert!(args.no_delay);
        assert_eq!(args.seed, Some(4));
        let Command::Quote(amount) = args.command else {
            panic!("expected quote");
        };
        assert_eq!(amount.pair.from.code, Currency::USD);
        assert_eq!(amount.pair.to.chain, Some(Chain::Polygon));
        assert_eq!(amount.amount, "250");
    }

    #[test]
    fn negative_amount_is_accepted_as_text() {
        let args = Args::try_parse_from(["uramp", "convert", "BTC", "EUR", "-1", "--execute"]).unwrap();
        let Command::Convert { pair, execute } = args.command else {
            panic!("expected convert");
        };
        assert!(execute);
        assert_eq!(pair.amount, "-1");
    }

    #[test]
    fn rejects_unsupported_chain() {
        assert!(Args::try_parse_from(["uramp", "route", "USD", "BTC@Solana"]).is_err());
    }

    #[test]
    fn parses_enable_models() {
        let args = Args::try_parse_from([
            "uramp", "enable", "noah", "sub-account", "--email", "jane@example.com",
        ])
        .unwrap();
        assert!(matches!(
            args.command,
            Command::Enable { ref id, model: EnableCommand::SubAccount { ref email } }
                if id == "noah" && email == "jane@example.com"
        ));

        let args = Args::try_parse_from(["uramp", "enable", "pdax", "link", "--signup"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Enable { model: EnableCommand::Link { signup: true }, .. }
        ));
    }

    #[test]
    fn providers_filter_by_category() {
        let args = Args::try_parse_from(["uramp", "providers", "--category", "swap"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Providers { category: Some(ProviderCategory::Swap) }
        ));
    }
}
