//! Core data models for bizbooks
//!
//! Accounts, vendors, categories, transactions and their splits as delivered
//! by the bookkeeping API, plus the calendar month used to bucket report
//! activity.

pub mod account;
pub mod category;
pub mod ids;
pub mod month;
pub mod transaction;
pub mod vendor;

pub use account::{Account, AccountValidationError};
pub use category::{Category, CategoryKind, CategoryValidationError};
pub use ids::{AccountId, BusinessId, CategoryId, TransactionId, VendorId};
pub use month::ReportMonth;
pub use transaction::{parse_posted_date, Transaction, TransactionSplit};
pub use vendor::{Vendor, VendorValidationError};
