use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

/// A debt account as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Display name. Not required to be unique.
    pub name: String,
    /// The outstanding balance.
    pub balance: Decimal,
    /// The annual interest rate as a percentage (e.g., 18.99 for 18.99%).
    pub apr: Decimal,
    /// The minimum monthly payment.
    pub minimum_payment: Decimal,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        balance: Decimal,
        apr: Decimal,
        minimum_payment: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            balance,
            apr,
            minimum_payment,
        }
    }

    /// Converts the APR percentage into the simple monthly rate `apr / 100 / 12`.
    pub fn monthly_rate(&self) -> Decimal {
        self.apr / dec!(100) / dec!(12)
    }

    /// Rejects negative balance, APR or minimum payment.
    pub fn validate(&self) -> PlanResult<()> {
        if self.balance < Decimal::ZERO {
            return Err(PlanError::NegativeBalance {
                name: self.name.clone(),
                value: self.balance,
            });
        }
        if self.apr < Decimal::ZERO {
            return Err(PlanError::NegativeApr {
                name: self.name.clone(),
                value: self.apr,
            });
        }
        if self.minimum_payment < Decimal::ZERO {
            return Err(PlanError::NegativeMinimumPayment {
                name: self.name.clone(),
                value: self.minimum_payment,
            });
        }
        Ok(())
    }
}

/// Summary of an account as it entered a plan, in strategy order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSummary {
    pub name: String,
    pub original_balance: Decimal,
    pub apr: Decimal,
    pub minimum_payment: Decimal,
}

impl From<&Account> for CardSummary {
    fn from(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            original_balance: account.balance,
            apr: account.apr,
            minimum_payment: account.minimum_payment,
        }
    }
}

/// Validates every account and the extra payment before a simulation starts.
pub fn validate_inputs(accounts: &[Account], extra_payment: Decimal) -> PlanResult<()> {
    if extra_payment < Decimal::ZERO {
        return Err(PlanError::NegativeExtraPayment(extra_payment));
    }
    accounts.iter().try_for_each(Account::validate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_monthly_rate() {
        let account = Account::new("Chase Freedom", dec!(5000), dec!(18.99), dec!(100));
        assert_eq!(account.monthly_rate(), dec!(0.015825));
    }

    #[rstest]
    #[case(dec!(-1), dec!(10), dec!(25))]
    #[case(dec!(100), dec!(-0.5), dec!(25))]
    #[case(dec!(100), dec!(10), dec!(-25))]
    fn test_negative_fields_are_rejected(
        #[case] balance: Decimal,
        #[case] apr: Decimal,
        #[case] minimum_payment: Decimal,
    ) {
        let account = Account::new("Bad", balance, apr, minimum_payment);
        let err = account.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Bad"));
    }

    #[test]
    fn test_zero_values_are_valid() {
        let account = Account::new("Paid", dec!(0), dec!(0), dec!(0));
        assert!(account.validate().is_ok());
    }

    #[test]
    fn test_negative_extra_payment_is_rejected() {
        let err = validate_inputs(&[], dec!(-10)).unwrap_err();
        assert!(matches!(err, PlanError::NegativeExtraPayment(v) if v == dec!(-10)));
    }

    #[test]
    fn test_card_summary_keeps_original_values() {
        let account = Account::new("Discover", dec!(3000), dec!(12.99), dec!(75));
        let summary = CardSummary::from(&account);
        assert_eq!(summary.name, "Discover");
        assert_eq!(summary.original_balance, dec!(3000));
        assert_eq!(summary.apr, dec!(12.99));
        assert_eq!(summary.minimum_payment, dec!(75));
    }
}
