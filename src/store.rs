//! Keyed storage for account records with JSON persistence.

use std::collections::BTreeMap;
use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::error::{PlanError, PlanResult};

/// Totals shown alongside the account list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSummary {
    pub account_count: usize,
    pub total_debt: Decimal,
    pub total_minimum_payment: Decimal,
}

/// Account records keyed by a monotonically assigned id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountBook {
    next_id: u64,
    accounts: BTreeMap<u64, Account>,
}

impl AccountBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores `account`, returning its new id.
    pub fn add(&mut self, account: Account) -> PlanResult<u64> {
        account.validate()?;
        self.next_id += 1;
        let id = self.next_id;
        tracing::debug!(id, name = %account.name, "account added");
        self.accounts.insert(id, account);
        Ok(id)
    }

    pub fn get(&self, id: u64) -> PlanResult<&Account> {
        self.accounts.get(&id).ok_or(PlanError::AccountNotFound(id))
    }

    /// Replaces the record stored under `id`.
    pub fn update(&mut self, id: u64, account: Account) -> PlanResult<()> {
        account.validate()?;
        let slot = self
            .accounts
            .get_mut(&id)
            .ok_or(PlanError::AccountNotFound(id))?;
        tracing::debug!(id, name = %account.name, "account updated");
        *slot = account;
        Ok(())
    }

    pub fn remove(&mut self, id: u64) -> PlanResult<Account> {
        let account = self
            .accounts
            .remove(&id)
            .ok_or(PlanError::AccountNotFound(id))?;
        tracing::debug!(id, name = %account.name, "account removed");
        Ok(account)
    }

    /// Records in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Account)> {
        self.accounts.iter().map(|(id, account)| (*id, account))
    }

    /// Snapshot of every account in id order, ready to hand to a strategy.
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn summary(&self) -> DebtSummary {
        DebtSummary {
            account_count: self.accounts.len(),
            total_debt: self
                .accounts
                .values()
                .fold(Decimal::ZERO, |total, a| total.saturating_add(a.balance)),
            total_minimum_payment: self
                .accounts
                .values()
                .fold(Decimal::ZERO, |total, a| total.saturating_add(a.minimum_payment)),
        }
    }

    /// Writes the book to disk atomically by staging to a temporary file.
    pub fn save(&self, path: &Path) -> PlanResult<()> {
        let tmp = path.with_extension("tmp");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&tmp, json)?;
        fs::rename(tmp, path)?;
        tracing::info!(path = %path.display(), accounts = self.len(), "account book saved");
        Ok(())
    }

    /// Loads a book from disk.
    ///
    /// Accepts either a saved book or a plain JSON array of accounts, which
    /// receive ids in array order. Every record is validated.
    pub fn load(path: &Path) -> PlanResult<Self> {
        let data = fs::read_to_string(path)?;
        let book = Self::from_json(&data)?;
        tracing::info!(path = %path.display(), accounts = book.len(), "account book loaded");
        Ok(book)
    }

    /// Parses a saved book or a plain array of accounts.
    pub fn from_json(data: &str) -> PlanResult<Self> {
        if data.trim_start().starts_with('[') {
            let mut book = AccountBook::new();
            for account in serde_json::from_str::<Vec<Account>>(data)? {
                book.add(account)?;
            }
            return Ok(book);
        }

        let mut book: AccountBook = serde_json::from_str(data)?;
        book.accounts.values().try_for_each(Account::validate)?;
        // Never hand out an id that is already taken.
        if let Some(&last) = book.accounts.keys().next_back() {
            book.next_id = book.next_id.max(last);
        }
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_book() -> AccountBook {
        let mut book = AccountBook::new();
        book.add(Account::new("Chase Freedom", dec!(5000), dec!(18.99), dec!(100)))
            .unwrap();
        book.add(Account::new("Capital One", dec!(2000), dec!(24.99), dec!(50)))
            .unwrap();
        book
    }

    #[test]
    fn test_add_and_get() {
        let book = sample_book();

        assert_eq!(book.len(), 2);
        assert_eq!(book.get(1).unwrap().name, "Chase Freedom");
        assert_eq!(book.get(2).unwrap().name, "Capital One");
        assert!(matches!(book.get(3), Err(PlanError::AccountNotFound(3))));
    }

    #[test]
    fn test_update_and_remove() {
        let mut book = sample_book();

        book.update(2, Account::new("Capital One", dec!(1500), dec!(24.99), dec!(50)))
            .unwrap();
        assert_eq!(book.get(2).unwrap().balance, dec!(1500));

        let removed = book.remove(1).unwrap();
        assert_eq!(removed.name, "Chase Freedom");
        assert_eq!(book.len(), 1);
        assert!(book.remove(1).is_err());
        assert!(book.update(1, removed).is_err());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut book = sample_book();
        book.remove(2).unwrap();

        let id = book
            .add(Account::new("Discover", dec!(3000), dec!(12.99), dec!(75)))
            .unwrap();
        assert_eq!(id, 3);
    }

    #[test]
    fn test_invalid_account_is_rejected() {
        let mut book = AccountBook::new();
        let err = book
            .add(Account::new("Bad", dec!(-1), dec!(10), dec!(10)))
            .unwrap_err();

        assert!(err.is_validation());
        assert!(book.is_empty());
    }

    #[test]
    fn test_summary() {
        let summary = sample_book().summary();

        assert_eq!(summary.account_count, 2);
        assert_eq!(summary.total_debt, dec!(7000));
        assert_eq!(summary.total_minimum_payment, dec!(150));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        let book = sample_book();

        book.save(&path).unwrap();
        let loaded = AccountBook::load(&path).unwrap();

        assert_eq!(loaded, book);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_load_plain_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        fs::write(
            &path,
            r#"[
                {"name": "Discover", "balance": 3000, "apr": 12.99, "minimum_payment": 75},
                {"name": "Capital One", "balance": "2000", "apr": "24.99", "minimum_payment": "50"}
            ]"#,
        )
        .unwrap();

        let book = AccountBook::load(&path).unwrap();

        assert_eq!(book.len(), 2);
        assert_eq!(book.get(1).unwrap().apr, dec!(12.99));
        assert_eq!(book.get(2).unwrap().balance, dec!(2000));
    }

    #[test]
    fn test_load_rejects_negative_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        fs::write(
            &path,
            r#"[{"name": "Bad", "balance": -10, "apr": 1, "minimum_payment": 1}]"#,
        )
        .unwrap();

        assert!(AccountBook::load(&path).unwrap_err().is_validation());
    }

    #[test]
    fn test_saved_layout_parses() {
        let book = AccountBook::from_json(
            r#"{"next_id": 1, "accounts": {"1": {"name": "Keep", "balance": "10", "apr": "5", "minimum_payment": "1"}}}"#,
        )
        .unwrap();

        assert_eq!(book.get(1).unwrap().name, "Keep");
    }

    #[test]
    fn test_stale_next_id_does_not_overwrite() {
        let mut book = AccountBook::from_json(
            r#"{"next_id": 0, "accounts": {"1": {"name": "Keep", "balance": "10", "apr": "5", "minimum_payment": "1"}}}"#,
        )
        .unwrap();

        let id = book
            .add(Account::new("New", dec!(20), dec!(5), dec!(1)))
            .unwrap();

        assert_eq!(id, 2);
        assert_eq!(book.len(), 2);
        assert_eq!(book.get(1).unwrap().name, "Keep");
    }

    #[test]
    fn test_save_load_then_add() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        sample_book().save(&path).unwrap();

        let mut loaded = AccountBook::load(&path).unwrap();
        let id = loaded
            .add(Account::new("Discover", dec!(3000), dec!(12.99), dec!(75)))
            .unwrap();

        assert_eq!(id, 3);
        assert_eq!(loaded.len(), 3);
    }
}
