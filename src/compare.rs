use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::config::PlanConfig;
use crate::engine::PayoffPlan;
use crate::error::PlanResult;
use crate::strategy::Strategy;

/// Which strategy the comparison favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Snowball,
    Avalanche,
}

/// Snowball and avalanche plans for the same accounts and extra payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub snowball: PayoffPlan,
    pub avalanche: PayoffPlan,
    /// Interest avalanche saves over snowball. Negative if it costs more.
    pub avalanche_saves_interest: Decimal,
    /// Months avalanche saves over snowball. Negative if it takes longer.
    pub avalanche_saves_months: i64,
    pub recommendation: Recommendation,
}

/// Runs both strategies with the default config and compares them.
pub fn compare(accounts: &[Account], extra_payment: Decimal) -> PlanResult<Comparison> {
    compare_with(accounts, extra_payment, &PlanConfig::default())
}

/// Runs both strategies and recommends avalanche when it saves more than
/// `interest_savings_threshold` in interest or more than
/// `month_savings_threshold` months. Either condition is enough.
pub fn compare_with(
    accounts: &[Account],
    extra_payment: Decimal,
    config: &PlanConfig,
) -> PlanResult<Comparison> {
    let (snowball, avalanche) = run_both(accounts, extra_payment, config);
    let (snowball, avalanche) = (snowball?, avalanche?);

    let saves_interest = (snowball.total_interest - avalanche.total_interest).round_dp(2);
    let saves_months =
        i64::from(snowball.payoff_time_months) - i64::from(avalanche.payoff_time_months);

    let recommendation = if saves_interest > config.interest_savings_threshold
        || saves_months > config.month_savings_threshold
    {
        Recommendation::Avalanche
    } else {
        Recommendation::Snowball
    };

    tracing::info!(
        accounts = accounts.len(),
        %extra_payment,
        %saves_interest,
        saves_months,
        ?recommendation,
        "compared payoff strategies"
    );

    Ok(Comparison {
        snowball,
        avalanche,
        avalanche_saves_interest: saves_interest,
        avalanche_saves_months: saves_months,
        recommendation,
    })
}

#[cfg(feature = "parallel")]
fn run_both(
    accounts: &[Account],
    extra_payment: Decimal,
    config: &PlanConfig,
) -> (PlanResult<PayoffPlan>, PlanResult<PayoffPlan>) {
    rayon::join(
        || Strategy::Snowball.plan_with(accounts, extra_payment, config),
        || Strategy::Avalanche.plan_with(accounts, extra_payment, config),
    )
}

#[cfg(not(feature = "parallel"))]
fn run_both(
    accounts: &[Account],
    extra_payment: Decimal,
    config: &PlanConfig,
) -> (PlanResult<PayoffPlan>, PlanResult<PayoffPlan>) {
    (
        Strategy::Snowball.plan_with(accounts, extra_payment, config),
        Strategy::Avalanche.plan_with(accounts, extra_payment, config),
    )
}
