//! Transaction repository for JSON storage
//!
//! Manages loading and saving a business's transactions to transactions.json

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::info;

use crate::error::BooksError;
use crate::models::{AccountId, BusinessId, Transaction, TransactionId};

use super::file_io::write_json_atomic;
use super::read_records;

/// Repository for transaction persistence with an account index
pub struct TransactionRepository {
    path: PathBuf,
    business_id: BusinessId,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: account_id -> transaction_ids
    by_account: RwLock<HashMap<AccountId, Vec<TransactionId>>>,
}

/// Newest first: posted date descending, then creation time descending.
/// Transactions without a parseable date sort last.
pub(crate) fn newest_first(a: &Transaction, b: &Transaction) -> Ordering {
    b.posted_date()
        .cmp(&a.posted_date())
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf, business_id: BusinessId) -> Self {
        Self {
            path,
            business_id,
            data: RwLock::new(HashMap::new()),
            by_account: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the account index
    pub fn load(&self) -> Result<(), BooksError> {
        let records: Vec<Transaction> =
            read_records(&self.path, self.business_id, "transaction", |t: &Transaction| {
                t.business_id
            })?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_account.clear();

        for txn in records {
            if data.contains_key(&txn.id) {
                continue;
            }
            if let Some(account_id) = txn.account_id {
                by_account.entry(account_id).or_default().push(txn.id);
            }
            data.insert(txn.id, txn);
        }

        info!(business = %self.business_id, count = data.len(), "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk, newest first
    pub fn save(&self) -> Result<(), BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(newest_first);

        write_json_atomic(&self.path, &transactions)?;
        info!(business = %self.business_id, count = transactions.len(), "saved transactions");
        Ok(())
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Get transactions for an account, newest first
    pub fn get_by_account(&self, account_id: AccountId) -> Result<Vec<Transaction>, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_account = self
            .by_account
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = by_account
            .get(&account_id)
            .map(|ids| ids.iter().filter_map(|id| data.get(id).cloned()).collect())
            .unwrap_or_default();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), BooksError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = old.account_id.and_then(|a| by_account.get_mut(&a)) {
                ids.retain(|id| *id != txn.id);
            }
        }

        if let Some(account_id) = txn.account_id {
            by_account.entry(account_id).or_default().push(txn.id);
        }
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Next free id: one more than the largest existing id
    pub fn next_id(&self) -> Result<TransactionId, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let max = data.keys().map(|id| id.value()).max().unwrap_or(0);
        Ok(TransactionId::new(max + 1))
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
