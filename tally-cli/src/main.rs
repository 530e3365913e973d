//! tally: spending report from a bank statement export
//!
//! Usage:
//!   tally init                                   Write a default tally.toml
//!   tally report --date "2018-01-20 18:59:59"    Month-to-date report (JSON)
//!   tally category Переводы --date 15.02.2022    Three-month category spend
//!   tally phones                                 Transactions mentioning a phone number

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use tally_core::{Reference, Transaction, parse_reference_datetime, parse_report_day};
use tally_finance::{MarketClient, monthly_report, phone_transactions_json, spending_by_category};
use tally_ingest::{SaveOptions, into_transactions, load_statement, save_report};

mod config;
mod logging;

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TALLY_BUILD_SHA"), ")"),
    about = "Spending report from a bank statement export"
)]
struct Cli {
    /// Config file
    #[arg(long, global = true, default_value = "tally.toml")]
    config: PathBuf,

    /// Statement file (overrides [data].statement)
    #[arg(long, global = true)]
    statement: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config file
    Init,

    /// Month-to-date report: cards, top transactions, currency rates, stocks
    Report {
        /// Reference instant, "YYYY-MM-DD HH:MM:SS"
        #[arg(long)]
        date: String,
    },

    /// Spending in one category over the three months before a date
    Category {
        /// Category name as it appears in the statement
        name: String,

        /// Reference day, "DD.MM.YYYY" (default: now)
        #[arg(long)]
        date: Option<String>,

        /// Save the rows to an auto-named CSV in [data].reports_dir
        #[arg(long)]
        save: bool,

        /// Save the rows to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Transactions whose description contains a mobile phone number
    Phones,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log = logging::init(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Command::Init => {
            config::init_config(&cli.config)?;
        }

        Command::Report { date } => {
            // Fail fast on input and keys before touching the statement
            let reference = parse_reference_datetime(&date)?;
            let cfg = config::load_config(&cli.config)?;
            let market = MarketClient::new(cfg.market.to_market_config())
                .context("market data configuration")?;

            let statement = statement_path(cli.statement.as_deref(), &cfg);
            let txns = load_transactions(&statement)?;

            let report =
                monthly_report(&market, reference, &txns, &cfg.user.currencies, &cfg.user.stocks)
                    .await;
            println!("{}", report.to_json()?);
        }

        Command::Category {
            name,
            date,
            save,
            output,
        } => {
            let reference = date
                .as_deref()
                .map(parse_report_day)
                .transpose()?
                .map(Reference::Day);
            let cfg = config::load_config(&cli.config)?;
            let statement = statement_path(cli.statement.as_deref(), &cfg);
            let txns = load_transactions(&statement)?;

            let options = match (output, save) {
                (Some(path), _) => SaveOptions::explicit(path),
                (None, true) => SaveOptions::auto(&cfg.data.reports_dir),
                (None, false) => SaveOptions::disabled(),
            };
            let saved = save_report(&options, "spending_by_category", || {
                Ok(spending_by_category(&txns, &name, reference))
            })?;

            println!("{}", serde_json::to_string_pretty(&saved.rows)?);
            if let Some(path) = saved.path {
                eprintln!("Report saved to {}", path.display());
            }
        }

        Command::Phones => {
            let cfg = config::load_config(&cli.config)?;
            let statement = statement_path(cli.statement.as_deref(), &cfg);
            let txns = load_transactions(&statement)?;
            println!("{}", phone_transactions_json(&txns)?);
        }
    }

    Ok(())
}

fn statement_path(flag: Option<&Path>, cfg: &config::Config) -> PathBuf {
    flag.map(Path::to_path_buf)
        .unwrap_or_else(|| cfg.data.statement.clone())
}

/// Load failures yield no rows; a malformed row aborts the run.
fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let rows = load_statement(path);
    into_transactions(rows).with_context(|| format!("parsing {}", path.display()))
}
