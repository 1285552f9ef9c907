//! `debt_payoff` is a Rust library for planning credit card payoff.
//!
//! It simulates paying down several debt accounts month by month under the two
//! classic greedy strategies:
//! - **Snowball**: every surplus dollar goes to the account with the smallest
//!   balance.
//! - **Avalanche**: every surplus dollar goes to the account with the highest APR.
//!
//! Every month interest accrues on all open accounts, each account receives its
//! minimum payment, and whatever is left of the budget (the sum of minimums plus
//! the extra payment) goes to the first account in strategy order that still
//! has a balance. A run stops once all balances are zero or after
//! [`MAX_SIMULATION_MONTHS`] months.
//!
//! ## Usage
//!
//! ```rust
//! use debt_payoff::{compare, Account, Recommendation};
//! use rust_decimal_macros::dec;
//!
//! let accounts = vec![
//!     Account::new("Chase Freedom", dec!(5000), dec!(18.99), dec!(100)),
//!     Account::new("Capital One", dec!(2000), dec!(24.99), dec!(50)),
//!     Account::new("Discover", dec!(3000), dec!(12.99), dec!(75)),
//! ];
//!
//! let comparison = compare(&accounts, dec!(100)).unwrap();
//!
//! println!("Snowball months:  {}", comparison.snowball.payoff_time_months);
//! println!("Avalanche months: {}", comparison.avalanche.payoff_time_months);
//! println!("Avalanche saves:  {:.2}", comparison.avalanche_saves_interest);
//! assert_eq!(comparison.recommendation, Recommendation::Avalanche);
//! ```

pub mod account;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod store;
pub mod strategy;

pub use account::{Account, CardSummary};
pub use compare::{compare, compare_with, Comparison, Recommendation};
pub use config::{PlanConfig, MAX_SIMULATION_MONTHS, SCHEDULE_PREVIEW_MONTHS};
pub use engine::{simulate, simulate_with, MonthRecord, PaymentEntry, PayoffPlan, Termination};
pub use error::{PlanError, PlanResult};
pub use store::{AccountBook, DebtSummary};
pub use strategy::Strategy;

use std::sync::Once;

use tracing_subscriber::filter::LevelFilter;

static TRACING_INIT: Once = Once::new();

/// Installs a global `tracing` subscriber writing to stderr.
///
/// `level` is the default verbosity; `RUST_LOG` directives take precedence.
/// Unknown levels fall back to `info`. Only the first call has any effect.
pub fn init_tracing(level: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::builder()
            .with_default_directive(parse_level(level).into())
            .from_env_lossy();

        if let Err(err) = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
        {
            tracing::debug!(%err, "tracing subscriber already installed");
        }
    });
}

fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::INFO)
}
