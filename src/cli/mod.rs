//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod category;
pub mod report;
pub mod transaction;
pub mod vendor;

pub use account::{handle_account_command, AccountCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use report::{handle_report_command, ReportCommands, ReportFormat};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use vendor::{handle_vendor_command, VendorCommands};
