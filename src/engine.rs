//! Month-by-month payoff simulation.
//!
//! Each month interest accrues on every open account, then the shared budget
//! (all minimum payments plus the extra payment) is spent in strategy order:
//! first the minimums, then whatever is left goes to the first account that
//! still carries a balance.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::account::{validate_inputs, Account, CardSummary};
use crate::config::PlanConfig;
use crate::error::PlanResult;

/// Payment made to one account in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub name: String,
    /// Minimum plus any extra applied this month.
    pub payment: Decimal,
    /// Balance left after the payment, never negative.
    pub remaining_balance: Decimal,
}

/// Payments and interest for a single simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    /// Month number (1-indexed).
    pub month: u32,
    pub cards: Vec<PaymentEntry>,
    pub total_payment: Decimal,
    pub total_interest: Decimal,
}

/// How a simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Every balance reached zero.
    PaidOff,
    /// The month ceiling was hit with debt still outstanding.
    CeilingReached,
}

/// Result of simulating one repayment strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffPlan {
    pub method: String,
    /// Interest accrued over the whole run, rounded to cents.
    pub total_interest: Decimal,
    pub payoff_time_months: u32,
    pub payoff_time_years: Decimal,
    /// Original balances plus total interest.
    pub total_payments: Decimal,
    /// The first months of the schedule.
    pub monthly_payments: Vec<MonthRecord>,
    /// Accounts in the order the strategy paid them.
    pub cards: Vec<CardSummary>,
    pub extra_payment: Decimal,
    pub termination: Termination,
    /// Debt still outstanding when the run stopped.
    pub remaining_balance: Decimal,
}

impl PayoffPlan {
    fn empty(method: &str, extra_payment: Decimal) -> Self {
        Self {
            method: method.to_string(),
            total_interest: Decimal::ZERO,
            payoff_time_months: 0,
            payoff_time_years: Decimal::ZERO,
            total_payments: Decimal::ZERO,
            monthly_payments: Vec::new(),
            cards: Vec::new(),
            extra_payment,
            termination: Termination::PaidOff,
            remaining_balance: Decimal::ZERO,
        }
    }

    pub fn is_paid_off(&self) -> bool {
        self.termination == Termination::PaidOff
    }
}

/// Simulates `ordered_accounts` in the given order with the default config.
///
/// # Errors
///
/// Returns a validation error if any amount is negative.
pub fn simulate(
    ordered_accounts: &[Account],
    extra_payment: Decimal,
    method: &str,
) -> PlanResult<PayoffPlan> {
    simulate_with(ordered_accounts, extra_payment, method, &PlanConfig::default())
}

/// Simulates `ordered_accounts` in the given order.
///
/// The run stops once every balance is zero or after `config.max_months`
/// months, whichever comes first. Hitting the ceiling is reported through
/// `PayoffPlan::termination`, not as an error. Amounts saturate at
/// `Decimal::MAX` rather than overflow, so runaway balances still end at the
/// ceiling.
pub fn simulate_with(
    ordered_accounts: &[Account],
    extra_payment: Decimal,
    method: &str,
    config: &PlanConfig,
) -> PlanResult<PayoffPlan> {
    validate_inputs(ordered_accounts, extra_payment)?;

    if ordered_accounts.is_empty() {
        return Ok(PayoffPlan::empty(method, extra_payment));
    }

    let total_available = saturating_sum(ordered_accounts.iter().map(|a| a.minimum_payment))
        .saturating_add(extra_payment);

    let mut balances: Vec<Decimal> = ordered_accounts.iter().map(|a| a.balance).collect();
    let mut month = 0;
    let mut total_interest = Decimal::ZERO;
    let mut schedule =
        Vec::with_capacity(config.schedule_preview_months.min(config.max_months as usize));

    while has_debt(&balances) && month < config.max_months {
        month += 1;
        let step = step_month(ordered_accounts, &balances, total_available, month);

        total_interest = total_interest.saturating_add(step.interest);
        balances = step.balances;

        if schedule.len() < config.schedule_preview_months {
            schedule.push(step.record);
        }
    }

    if balances.contains(&Decimal::MAX) {
        tracing::warn!(method, month, "a balance saturated at the decimal maximum");
    }

    let termination = if has_debt(&balances) {
        tracing::warn!(
            method,
            month,
            "simulation stopped at the month ceiling with debt outstanding"
        );
        Termination::CeilingReached
    } else {
        Termination::PaidOff
    };

    let original_total = saturating_sum(ordered_accounts.iter().map(|a| a.balance));
    let remaining = saturating_sum(balances.iter().copied().filter(|b| *b > Decimal::ZERO));

    tracing::debug!(
        method,
        months = month,
        total_interest = %total_interest.round_dp(2),
        "simulation finished"
    );

    Ok(PayoffPlan {
        method: method.to_string(),
        total_interest: total_interest.round_dp(2),
        payoff_time_months: month,
        payoff_time_years: (Decimal::from(month) / dec!(12)).round_dp(1),
        total_payments: original_total.saturating_add(total_interest).round_dp(2),
        monthly_payments: schedule,
        cards: ordered_accounts.iter().map(CardSummary::from).collect(),
        extra_payment,
        termination,
        remaining_balance: remaining.round_dp(2),
    })
}

fn has_debt(balances: &[Decimal]) -> bool {
    balances.iter().any(|b| *b > Decimal::ZERO)
}

fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |total, amount| total.saturating_add(amount))
}

/// Outcome of one month: the new balances, the raw interest and the record.
struct MonthStep {
    balances: Vec<Decimal>,
    interest: Decimal,
    record: MonthRecord,
}

/// Payment for one account, accumulated across the passes of a month.
#[derive(Debug, Default)]
struct EntryBuilder {
    payment: Decimal,
    remaining: Decimal,
}

impl EntryBuilder {
    fn pay(&mut self, amount: Decimal, remaining: Decimal) {
        self.payment += amount;
        self.remaining = remaining;
    }
}

fn step_month(
    accounts: &[Account],
    balances: &[Decimal],
    available: Decimal,
    month: u32,
) -> MonthStep {
    // Interest compounds before any payment is applied.
    let mut interest = Decimal::ZERO;
    let mut accrued = Vec::with_capacity(balances.len());
    for (account, &balance) in accounts.iter().zip(balances) {
        if balance > Decimal::ZERO {
            let charge = balance.saturating_mul(account.monthly_rate());
            interest = interest.saturating_add(charge);
            accrued.push(balance.saturating_add(charge));
        } else {
            accrued.push(balance);
        }
    }

    let mut entries: BTreeMap<usize, EntryBuilder> = BTreeMap::new();

    let remaining = accrued
        .iter_mut()
        .enumerate()
        .filter(|(_, balance)| **balance > Decimal::ZERO)
        .fold(available, |pool, (index, balance)| {
            let payment = accounts[index].minimum_payment.min(*balance).min(pool);
            *balance -= payment;
            entries.entry(index).or_default().pay(payment, *balance);
            pool - payment
        });

    // The leftover goes to a single target account, never cascading.
    if remaining > Decimal::ZERO {
        if let Some((index, balance)) = accrued
            .iter_mut()
            .enumerate()
            .find(|(_, balance)| **balance > Decimal::ZERO)
        {
            let extra = remaining.min(*balance);
            *balance -= extra;
            entries.entry(index).or_default().pay(extra, *balance);
        }
    }

    let total_payment = saturating_sum(entries.values().map(|entry| entry.payment));
    let cards: Vec<PaymentEntry> = entries
        .into_iter()
        .map(|(index, entry)| PaymentEntry {
            name: accounts[index].name.clone(),
            payment: entry.payment.round_dp(2),
            remaining_balance: entry.remaining.max(Decimal::ZERO).round_dp(2),
        })
        .collect();

    MonthStep {
        balances: accrued,
        interest,
        record: MonthRecord {
            month,
            cards,
            total_payment: total_payment.round_dp(2),
            total_interest: interest.round_dp(2),
        },
    }
}
