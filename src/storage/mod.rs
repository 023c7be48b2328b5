//! Storage layer for bizbooks
//!
//! Each business keeps JSON snapshots of its accounts, vendors, categories
//! and transactions in its own directory. Files hold plain JSON arrays in the API's list shape, so
//! a saved API response can be dropped in as-is.

pub mod accounts;
pub mod categories;
pub mod file_io;
pub mod transactions;
pub mod vendors;

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::warn;

pub use accounts::AccountRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use transactions::TransactionRepository;
pub use vendors::VendorRepository;

use crate::config::paths::BooksPaths;
use crate::error::BooksError;
use crate::models::BusinessId;

/// Read a JSON array of records, dropping entries that don't decode or that
/// belong to another business.
pub(crate) fn read_records<T, F>(
    path: &Path,
    business_id: BusinessId,
    entity: &str,
    owner: F,
) -> Result<Vec<T>, BooksError>
where
    T: DeserializeOwned,
    F: Fn(&T) -> Option<BusinessId>,
{
    let raw: Vec<serde_json::Value> = read_json(path)?;
    let mut records = Vec::with_capacity(raw.len());

    for (position, value) in raw.into_iter().enumerate() {
        let record: T = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    file = %path.display(),
                    position,
                    error = %e,
                    "skipping malformed {} record",
                    entity
                );
                continue;
            }
        };

        match owner(&record) {
            Some(other) if other != business_id => {
                warn!(
                    file = %path.display(),
                    position,
                    owner = %other,
                    "skipping {} owned by another business",
                    entity
                );
            }
            _ => records.push(record),
        }
    }

    Ok(records)
}

/// Storage coordinator for one business
pub struct Storage {
    paths: BooksPaths,
    business_id: BusinessId,
    pub accounts: AccountRepository,
    pub vendors: VendorRepository,
    pub categories: CategoryRepository,
    pub transactions: TransactionRepository,
}

impl Storage {
    /// Create a new Storage instance scoped to a business
    pub fn new(paths: BooksPaths, business_id: BusinessId) -> Result<Self, BooksError> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountRepository::new(paths.accounts_file(business_id), business_id),
            vendors: VendorRepository::new(paths.vendors_file(business_id), business_id),
            categories: CategoryRepository::new(paths.categories_file(business_id), business_id),
            transactions: TransactionRepository::new(
                paths.transactions_file(business_id),
                business_id,
            ),
            paths,
            business_id,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BooksPaths {
        &self.paths
    }

    /// Business this storage is scoped to
    pub fn business_id(&self) -> BusinessId {
        self.business_id
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), BooksError> {
        self.accounts.load()?;
        self.vendors.load()?;
        self.categories.load()?;
        self.transactions.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BooksError> {
        self.accounts.save()?;
        self.vendors.save()?;
        self.categories.save()?;
        self.transactions.save()?;
        Ok(())
    }
}
