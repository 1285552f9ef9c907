use std::{fs, path::Path};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PlanResult;

/// Safety ceiling for a simulation: 50 years of monthly payments.
pub const MAX_SIMULATION_MONTHS: u32 = 600;

/// Number of months exposed in a plan's `monthly_payments`.
pub const SCHEDULE_PREVIEW_MONTHS: usize = 12;

/// Tunables for the engine and the comparator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Months after which a simulation stops even if debt remains.
    pub max_months: u32,
    /// How many month records a plan keeps.
    pub schedule_preview_months: usize,
    /// Avalanche is recommended when it saves more interest than this.
    pub interest_savings_threshold: Decimal,
    /// Avalanche is recommended when it saves more months than this.
    pub month_savings_threshold: i64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            max_months: MAX_SIMULATION_MONTHS,
            schedule_preview_months: SCHEDULE_PREVIEW_MONTHS,
            interest_savings_threshold: dec!(100),
            month_savings_threshold: 2,
        }
    }
}

impl PlanConfig {
    /// Reads a config from a JSON file; missing fields take their defaults.
    pub fn load(path: &Path) -> PlanResult<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PlanConfig = serde_json::from_str(r#"{ "max_months": 120 }"#).unwrap();
        assert_eq!(config.max_months, 120);
        assert_eq!(config.schedule_preview_months, 12);
        assert_eq!(config.interest_savings_threshold, dec!(100));
        assert_eq!(config.month_savings_threshold, 2);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        fs::write(&path, r#"{ "interest_savings_threshold": "250.5" }"#).unwrap();

        let config = PlanConfig::load(&path).unwrap();
        assert_eq!(config.interest_savings_threshold, dec!(250.5));
        assert_eq!(config.max_months, MAX_SIMULATION_MONTHS);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlanConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::error::PlanError::Io(_)));
    }
}
