//! Prepaid credit ledger: account balances plus an append-only history
//! of balance-changing events.
//!
//! The only mutation path for a balance is [`CreditLedger::debit`] /
//! [`CreditLedger::credit`], each executed as a single atomic transaction
//! against the account. Two concurrent debits that together exceed the
//! balance can never both succeed.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced by ledger transactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Bad input (empty user id, non-positive amount). Rejected before any
    /// transaction starts; no side effect.
    #[error("invalid ledger arguments: {0}")]
    InvalidArgument(String),

    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("insufficient balance: have {balance}, need {amount}")]
    InsufficientBalance { balance: i64, amount: i64 },
}

/// Category of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    Debit,
    Purchase,
    Bonus,
    Refund,
}

/// A single balance-changing event. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: String,
    pub kind: EntryKind,
    /// Signed amount: negative for debits, positive for credits.
    pub amount: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A user account: current balance plus its full entry history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    pub balance: i64,
    pub history: Vec<LedgerEntry>,
}

/// Optional parameters for a debit.
#[derive(Debug, Clone)]
pub struct DebitOptions {
    pub kind: EntryKind,
    pub description: String,
}

impl Default for DebitOptions {
    fn default() -> Self {
        Self {
            kind: EntryKind::Debit,
            description: "Débito de créditos".to_string(),
        }
    }
}

/// In-process ledger store keyed by user id.
///
/// The account map is guarded by a single mutex; the check-then-decrement
/// of a debit happens entirely under the lock, which is what gives each
/// transaction its all-or-nothing guarantee.
#[derive(Debug, Default)]
pub struct CreditLedger {
    accounts: Mutex<HashMap<String, Account>>,
}

impl CreditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account with an opening balance. Replaces nothing: opening
    /// an existing account is a no-op so history is never lost.
    pub fn open_account(&self, user_id: &str, opening_balance: i64) {
        let mut accounts = self.accounts.lock().expect("ledger lock poisoned");
        accounts.entry(user_id.to_string()).or_insert(Account {
            balance: opening_balance,
            history: Vec::new(),
        });
    }

    /// Atomically verify sufficient balance, decrement it, and append a
    /// debit entry with `amount = -amount`.
    ///
    /// Fails with [`LedgerError::InvalidArgument`] before touching the
    /// store, [`LedgerError::AccountNotFound`] or
    /// [`LedgerError::InsufficientBalance`] without mutating anything.
    pub fn debit(
        &self,
        user_id: &str,
        amount: i64,
        options: DebitOptions,
    ) -> Result<(), LedgerError> {
        if user_id.is_empty() || amount <= 0 {
            return Err(LedgerError::InvalidArgument(format!(
                "user_id={user_id:?} amount={amount}"
            )));
        }

        let mut accounts = self.accounts.lock().expect("ledger lock poisoned");
        let account = accounts
            .get_mut(user_id)
            .ok_or_else(|| LedgerError::AccountNotFound(user_id.to_string()))?;

        if account.balance < amount {
            return Err(LedgerError::InsufficientBalance {
                balance: account.balance,
                amount,
            });
        }

        account.balance -= amount;
        account.history.push(LedgerEntry {
            id: Uuid::new_v4().to_string(),
            kind: options.kind,
            amount: -amount,
            description: options.description,
            created_at: Utc::now(),
        });
        Ok(())
    }

    /// Append a positive entry (purchase, bonus) and raise the balance.
    pub fn credit(
        &self,
        user_id: &str,
        amount: i64,
        kind: EntryKind,
        description: &str,
    ) -> Result<(), LedgerError> {
        if user_id.is_empty() || amount <= 0 {
            return Err(LedgerError::InvalidArgument(format!(
                "user_id={user_id:?} amount={amount}"
            )));
        }

        let mut accounts = self.accounts.lock().expect("ledger lock poisoned");
        let account = accounts
            .get_mut(user_id)
            .ok_or_else(|| LedgerError::AccountNotFound(user_id.to_string()))?;

        account.balance += amount;
        account.history.push(LedgerEntry {
            id: Uuid::new_v4().to_string(),
            kind,
            amount,
            description: description.to_string(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    pub fn balance(&self, user_id: &str) -> Result<i64, LedgerError> {
        let accounts = self.accounts.lock().expect("ledger lock poisoned");
        accounts
            .get(user_id)
            .map(|a| a.balance)
            .ok_or_else(|| LedgerError::AccountNotFound(user_id.to_string()))
    }

    pub fn history(&self, user_id: &str) -> Result<Vec<LedgerEntry>, LedgerError> {
        let accounts = self.accounts.lock().expect("ledger lock poisoned");
        accounts
            .get(user_id)
            .map(|a| a.history.clone())
            .ok_or_else(|| LedgerError::AccountNotFound(user_id.to_string()))
    }
}
