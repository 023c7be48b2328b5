//! Account repository for JSON storage
//!
//! Manages loading and saving a business's accounts to accounts.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::info;

use crate::error::BooksError;
use crate::models::{Account, AccountId, BusinessId};

use super::file_io::write_json_atomic;
use super::read_records;

/// Repository for account persistence
pub struct AccountRepository {
    path: PathBuf,
    business_id: BusinessId,
    data: RwLock<HashMap<AccountId, Account>>,
}

impl AccountRepository {
    /// Create a new account repository
    pub fn new(path: PathBuf, business_id: BusinessId) -> Self {
        Self {
            path,
            business_id,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load accounts from disk
    pub fn load(&self) -> Result<(), BooksError> {
        let records: Vec<Account> =
            read_records(&self.path, self.business_id, "account", |a: &Account| {
                a.business_id
            })?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for account in records {
            data.entry(account.id).or_insert(account);
        }

        info!(business = %self.business_id, count = data.len(), "loaded accounts");
        Ok(())
    }

    /// Save accounts to disk
    pub fn save(&self) -> Result<(), BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by_key(|a| a.id);

        write_json_atomic(&self.path, &list)?;
        info!(business = %self.business_id, count = list.len(), "saved accounts");
        Ok(())
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> Result<Option<Account>, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all accounts sorted by name
    pub fn get_all(&self) -> Result<Vec<Account>, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        Ok(list)
    }

    /// Get an account by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Account>, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .filter(|a| a.name.to_lowercase() == name_lower)
            .min_by_key(|a| a.id)
            .cloned())
    }

    /// Insert or update an account
    pub fn upsert(&self, account: Account) -> Result<(), BooksError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(account.id, account);
        Ok(())
    }

    /// Next free id: one more than the largest existing id
    pub fn next_id(&self) -> Result<AccountId, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let max = data.keys().map(|id| id.value()).max().unwrap_or(0);
        Ok(AccountId::new(max + 1))
    }
}
