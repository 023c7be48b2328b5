//! Transaction service
//!
//! Provides business logic for recording and listing a business's
//! transactions.

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::error::{BooksError, BooksResult};
use crate::models::{
    AccountId, CategoryId, Transaction, TransactionId, TransactionSplit, VendorId,
};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by account
    pub account_id: Option<AccountId>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by account
    pub fn account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One category allocation of a new transaction
#[derive(Debug, Clone)]
pub struct NewSplit {
    pub category_id: CategoryId,
    pub amount: f64,
    pub memo: Option<String>,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub account_id: AccountId,
    pub account_name: Option<String>,
    pub payee: String,
    pub memo: Option<String>,
    pub posted_at: NaiveDate,
    pub amount: f64,
    pub vendor_id: Option<VendorId>,
    pub splits: Vec<NewSplit>,
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: NewTransaction) -> BooksResult<Transaction> {
        let payee = input.payee.trim();
        if payee.is_empty() {
            return Err(BooksError::Validation("Payee cannot be empty".into()));
        }

        if !input.amount.is_finite() {
            return Err(BooksError::Validation(
                "Transaction amount must be a number".into(),
            ));
        }

        let account = self
            .storage
            .accounts
            .get(input.account_id)?
            .ok_or_else(|| BooksError::account_not_found(input.account_id.to_string()))?;

        if let Some(vendor_id) = input.vendor_id {
            if self.storage.vendors.get(vendor_id)?.is_none() {
                return Err(BooksError::vendor_not_found(vendor_id.to_string()));
            }
        }

        if input.splits.is_empty() {
            return Err(BooksError::Validation(
                "A transaction needs at least one split".into(),
            ));
        }

        let mut splits = Vec::with_capacity(input.splits.len());
        for split in input.splits {
            if self.storage.categories.get(split.category_id)?.is_none() {
                return Err(BooksError::category_not_found(split.category_id.to_string()));
            }
            if !split.amount.is_finite() {
                return Err(BooksError::Validation(format!(
                    "Split amount for {} must be a number",
                    split.category_id
                )));
            }
            splits.push(TransactionSplit {
                category_id: Some(split.category_id),
                amount: split.amount,
                memo: non_blank(split.memo),
            });
        }

        let id = self.storage.transactions.next_id()?;
        let now = Utc::now();

        let mut txn = Transaction::new(id.value(), input.posted_at.format("%Y-%m-%d").to_string());
        txn.business_id = Some(self.storage.business_id());
        txn.account_id = Some(input.account_id);
        txn.account_name = non_blank(input.account_name).or(Some(account.name));
        txn.payee = payee.to_string();
        txn.memo = non_blank(input.memo);
        txn.amount = input.amount;
        txn.vendor_id = input.vendor_id;
        txn.splits = splits;
        txn.created_at = Some(now);
        txn.updated_at = Some(now);

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        info!(
            transaction = %txn.id,
            posted_at = %txn.posted_at,
            splits = txn.splits.len(),
            "created transaction"
        );
        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> BooksResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by ID string
    pub fn find(&self, identifier: &str) -> BooksResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }
        Ok(None)
    }

    /// List transactions newest first with optional filtering
    pub fn list(&self, filter: TransactionFilter) -> BooksResult<Vec<Transaction>> {
        let mut transactions = match filter.account_id {
            Some(account_id) => self.list_for_account(account_id)?,
            None => self.storage.transactions.get_all()?,
        };

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Get transactions for an account, newest first
    pub fn list_for_account(&self, account_id: AccountId) -> BooksResult<Vec<Transaction>> {
        if self.storage.accounts.get(account_id)?.is_none() {
            return Err(BooksError::account_not_found(account_id.to_string()));
        }
        self.storage.transactions.get_by_account(account_id)
    }

    /// Count transactions
    pub fn count(&self) -> BooksResult<usize> {
        self.storage.transactions.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BooksPaths;
    use crate::models::{Account, BusinessId, Category, CategoryKind, Vendor};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BooksPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, BusinessId::new(1)).unwrap();
        storage.load_all().unwrap();
        storage
            .categories
            .upsert(Category::new(1, "Sales", CategoryKind::Income))
            .unwrap();
        storage
            .categories
            .upsert(Category::new(2, "Rent", CategoryKind::Expense))
            .unwrap();
        storage.accounts.upsert(Account::new(1, "Checking")).unwrap();
        storage.accounts.upsert(Account::new(2, "Card")).unwrap();
        storage.vendors.upsert(Vendor::new(1, "Landlord LLC")).unwrap();
        (temp_dir, storage)
    }

    fn input(date: (i32, u32, u32), amount: f64) -> NewTransaction {
        NewTransaction {
            account_id: AccountId::new(1),
            account_name: None,
            payee: "Acme Corp".into(),
            memo: None,
            posted_at: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            amount,
            vendor_id: None,
            splits: vec![NewSplit {
                category_id: CategoryId::new(1),
                amount,
                memo: None,
            }],
        }
    }

    #[test]
    fn test_create_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut new_txn = input((2024, 3, 5), 1200.0);
        new_txn.memo = Some("  ".into());
        new_txn.splits[0].memo = Some("March invoice".into());
        let txn = service.create(new_txn).unwrap();

        assert_eq!(txn.id, TransactionId::new(1));
        assert_eq!(txn.posted_at, "2024-03-05");
        assert_eq!(txn.memo, None);
        assert_eq!(txn.splits[0].memo.as_deref(), Some("March invoice"));
        assert_eq!(txn.business_id, Some(BusinessId::new(1)));
        assert_eq!(txn.account_name.as_deref(), Some("Checking"));
        assert!(txn.created_at.is_some());
        assert_eq!(txn.created_at, txn.updated_at);

        storage.transactions.load().unwrap();
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_split_total_need_not_match_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut new_txn = input((2024, 3, 5), -500.0);
        new_txn.splits = vec![NewSplit {
            category_id: CategoryId::new(2),
            amount: -120.0,
            memo: None,
        }];
        assert!(service.create(new_txn).is_ok());
    }

    #[test]
    fn test_create_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut no_payee = input((2024, 1, 1), 10.0);
        no_payee.payee = " ".into();
        assert!(service.create(no_payee).unwrap_err().is_validation());

        let not_a_number = input((2024, 1, 1), f64::NAN);
        assert!(service.create(not_a_number).unwrap_err().is_validation());

        let mut no_splits = input((2024, 1, 1), 10.0);
        no_splits.splits.clear();
        assert!(service.create(no_splits).unwrap_err().is_validation());

        let mut unknown_category = input((2024, 1, 1), 10.0);
        unknown_category.splits[0].category_id = CategoryId::new(99);
        assert!(service.create(unknown_category).unwrap_err().is_not_found());

        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_create_requires_known_account_and_vendor() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut unknown_account = input((2024, 1, 1), 10.0);
        unknown_account.account_id = AccountId::new(999);
        let err = service.create(unknown_account).unwrap_err();
        assert_eq!(err.to_string(), "Account not found: acc-999");

        let mut unknown_vendor = input((2024, 1, 1), 10.0);
        unknown_vendor.vendor_id = Some(VendorId::new(42));
        let err = service.create(unknown_vendor).unwrap_err();
        assert_eq!(err.to_string(), "Vendor not found: ven-42");

        let mut known_vendor = input((2024, 1, 1), -10.0);
        known_vendor.vendor_id = Some(VendorId::new(1));
        known_vendor.account_name = Some("Main checking".into());
        let txn = service.create(known_vendor).unwrap();
        assert_eq!(txn.vendor_id, Some(VendorId::new(1)));
        assert_eq!(txn.account_name.as_deref(), Some("Main checking"));

        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_list_for_unknown_account_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service.create(input((2024, 1, 10), 100.0)).unwrap();

        assert!(service
            .list_for_account(AccountId::new(999))
            .unwrap_err()
            .is_not_found());
        assert!(service
            .list(TransactionFilter::new().account(AccountId::new(999)))
            .unwrap_err()
            .is_not_found());
        assert!(service.list_for_account(AccountId::new(2)).unwrap().is_empty());
    }

    #[test]
    fn test_list_newest_first_with_filter() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service.create(input((2024, 1, 10), 100.0)).unwrap();
        service.create(input((2024, 3, 1), 300.0)).unwrap();
        let mut other_account = input((2024, 2, 1), 200.0);
        other_account.account_id = AccountId::new(2);
        service.create(other_account).unwrap();

        let dates: Vec<_> = service
            .list(TransactionFilter::new())
            .unwrap()
            .into_iter()
            .map(|t| t.posted_at)
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-10"]);

        let first_account = service
            .list(TransactionFilter::new().account(AccountId::new(1)).limit(1))
            .unwrap();
        assert_eq!(first_account.len(), 1);
        assert_eq!(first_account[0].posted_at, "2024-03-01");

        assert_eq!(service.list_for_account(AccountId::new(2)).unwrap().len(), 1);
        assert!(service.find("txn-2").unwrap().is_some());
    }
}
