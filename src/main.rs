use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use debt_payoff::{compare_with, init_tracing, AccountBook, PlanConfig, Strategy};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Snowball,
    Avalanche,
    Compare,
}

#[derive(Parser, Debug)]
#[command(name = "debt-payoff")]
#[command(about = "Compare snowball and avalanche credit card payoff plans")]
struct Args {
    /// JSON file holding the accounts (a saved book or a plain list)
    #[arg(short, long)]
    accounts: PathBuf,

    /// Extra amount paid every month on top of the minimums
    #[arg(short, long, default_value = "0")]
    extra: Decimal,

    /// Which plan to print
    #[arg(short, long, value_enum, default_value_t = Mode::Compare)]
    strategy: Mode,

    /// Optional JSON file overriding the simulation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the debt summary instead of a plan
    #[arg(long)]
    summary: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let book = AccountBook::load(&args.accounts)
        .with_context(|| format!("failed to load accounts from {}", args.accounts.display()))?;

    if args.summary {
        println!("{}", serde_json::to_string_pretty(&book.summary())?);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => PlanConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => PlanConfig::default(),
    };

    let accounts = book.accounts();
    let output = match args.strategy {
        Mode::Snowball => {
            let plan = Strategy::Snowball.plan_with(&accounts, args.extra, &config)?;
            serde_json::to_string_pretty(&plan)?
        }
        Mode::Avalanche => {
            let plan = Strategy::Avalanche.plan_with(&accounts, args.extra, &config)?;
            serde_json::to_string_pretty(&plan)?
        }
        Mode::Compare => {
            let comparison = compare_with(&accounts, args.extra, &config)?;
            serde_json::to_string_pretty(&comparison)?
        }
    };
    println!("{output}");

    Ok(())
}
