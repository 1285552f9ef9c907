use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::config::PlanConfig;
use crate::engine::{simulate_with, PayoffPlan};
use crate::error::PlanResult;

/// Greedy order in which surplus payments are directed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Smallest balance first.
    Snowball,
    /// Highest APR first.
    Avalanche,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Snowball, Strategy::Avalanche];

    /// Human readable method name used in plans.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Snowball => "Snowball (Smallest Balance First)",
            Strategy::Avalanche => "Avalanche (Highest Interest First)",
        }
    }

    /// Returns a copy of `accounts` sorted for this strategy.
    ///
    /// Both orderings are stable, so ties keep their input order.
    pub fn order(&self, accounts: &[Account]) -> Vec<Account> {
        let mut ordered = accounts.to_vec();
        match self {
            Strategy::Snowball => ordered.sort_by(|a, b| a.balance.cmp(&b.balance)),
            Strategy::Avalanche => ordered.sort_by(|a, b| b.apr.cmp(&a.apr)),
        }
        ordered
    }

    /// Orders `accounts` and simulates them with the default config.
    pub fn plan(&self, accounts: &[Account], extra_payment: Decimal) -> PlanResult<PayoffPlan> {
        self.plan_with(accounts, extra_payment, &PlanConfig::default())
    }

    pub fn plan_with(
        &self,
        accounts: &[Account],
        extra_payment: Decimal,
        config: &PlanConfig,
    ) -> PlanResult<PayoffPlan> {
        let _span = tracing::debug_span!("plan", strategy = %self).entered();
        simulate_with(&self.order(accounts), extra_payment, self.label(), config)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Snowball => write!(f, "snowball"),
            Strategy::Avalanche => write!(f, "avalanche"),
        }
    }
}
