//! Service layer for bizbooks
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation and the derived category views.

pub mod account;
pub mod category;
pub mod hierarchy;
pub mod transaction;
pub mod vendor;

pub use account::AccountService;
pub use category::{CategoryService, NewCategory};
pub use hierarchy::{build_options, build_tree, CategoryNode, CategoryOption};
pub use transaction::{NewSplit, NewTransaction, TransactionFilter, TransactionService};
pub use vendor::{NewVendor, VendorService};
