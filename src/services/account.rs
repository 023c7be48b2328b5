//! Account service
//!
//! Provides business logic for a business's accounts.

use chrono::Utc;
use tracing::info;

use crate::error::{BooksError, BooksResult};
use crate::models::{Account, AccountId};
use crate::storage::Storage;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new account
    pub fn create(&self, name: &str, account_type: Option<&str>) -> BooksResult<Account> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BooksError::Validation("Account name cannot be empty".into()));
        }

        if self.storage.accounts.get_by_name(name)?.is_some() {
            return Err(BooksError::Duplicate {
                entity_type: "Account",
                identifier: name.to_string(),
            });
        }

        let id = self.storage.accounts.next_id()?;
        let now = Utc::now();

        let mut account = Account::new(id.value(), name);
        account.business_id = Some(self.storage.business_id());
        account.account_type = account_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        account.created_at = Some(now);
        account.updated_at = Some(now);

        account
            .validate()
            .map_err(|e| BooksError::Validation(e.to_string()))?;

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        info!(account = %account.id, name = %account.name, "created account");
        Ok(account)
    }

    /// Find an account by ID (`3` or `acc-3`) or by name
    pub fn find(&self, identifier: &str) -> BooksResult<Option<Account>> {
        if let Ok(id) = identifier.parse::<AccountId>() {
            if let Some(account) = self.storage.accounts.get(id)? {
                return Ok(Some(account));
            }
        }

        self.storage.accounts.get_by_name(identifier.trim())
    }

    /// All accounts sorted by name
    pub fn list(&self) -> BooksResult<Vec<Account>> {
        self.storage.accounts.get_all()
    }
}
