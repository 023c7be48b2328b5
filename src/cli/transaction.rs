//! Transaction CLI commands
//!
//! Implements CLI commands for listing and recording transactions.

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{BooksError, BooksResult};
use crate::services::{
    AccountService, CategoryService, NewSplit, NewTransaction, TransactionFilter,
    TransactionService, VendorService,
};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions, newest first
    List {
        /// Filter by account name or ID
        #[arg(short, long)]
        account: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        transaction: String,
    },

    /// Record a new transaction
    Add {
        /// Account name or ID
        #[arg(short, long)]
        account: String,
        /// Account name to store alongside the ID
        #[arg(long)]
        account_name: Option<String>,
        /// Payee name
        #[arg(short, long)]
        payee: String,
        /// Total amount (negative for money out)
        #[arg(long, allow_hyphen_values = true)]
        amount: f64,
        /// Posting date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Memo
        #[arg(short, long)]
        memo: Option<String>,
        /// Vendor name or ID
        #[arg(long)]
        vendor: Option<String>,
        /// Category allocation as CATEGORY:AMOUNT (repeatable)
        #[arg(short, long = "split", required = true, allow_hyphen_values = true)]
        splits: Vec<String>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BooksResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::List { account, limit } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(account) = account {
                let found = AccountService::new(storage)
                    .find(&account)?
                    .ok_or_else(|| BooksError::account_not_found(account.clone()))?;
                filter = filter.account(found.id);
            }

            let transactions = service.list(filter)?;
            print!(
                "{}",
                format_transaction_register(
                    &transactions,
                    &settings.currency_symbol,
                    &settings.date_format
                )
            );
        }

        TransactionCommands::Show { transaction } => {
            let txn = service
                .find(&transaction)?
                .ok_or_else(|| BooksError::transaction_not_found(transaction.clone()))?;
            let categories = storage.categories.get_all()?;
            print!(
                "{}",
                format_transaction_details(&txn, &categories, &settings.currency_symbol)
            );
        }

        TransactionCommands::Add {
            account,
            account_name,
            payee,
            amount,
            date,
            memo,
            vendor,
            splits,
        } => {
            let posted_at = match date {
                Some(text) => parse_date(&text)?,
                None => Local::now().date_naive(),
            };

            let account = AccountService::new(storage)
                .find(&account)?
                .ok_or_else(|| BooksError::account_not_found(account.clone()))?;

            let vendor = match vendor {
                Some(vendor) => Some(
                    VendorService::new(storage)
                        .find(&vendor)?
                        .ok_or_else(|| BooksError::vendor_not_found(vendor.clone()))?
                        .id,
                ),
                None => None,
            };

            let categories = CategoryService::new(storage);
            let splits = splits
                .iter()
                .map(|arg| -> BooksResult<NewSplit> {
                    let (category, split_amount) = parse_split(arg)?;
                    let category = categories
                        .find(category)?
                        .ok_or_else(|| BooksError::category_not_found(category))?;
                    Ok(NewSplit {
                        category_id: category.id,
                        amount: split_amount,
                        memo: None,
                    })
                })
                .collect::<BooksResult<Vec<_>>>()?;

            let txn = service.create(NewTransaction {
                account_id: account.id,
                account_name,
                payee,
                memo,
                posted_at,
                amount,
                vendor_id: vendor,
                splits,
            })?;

            println!("Recorded transaction: {}", txn.id);
            println!("  Date:   {}", txn.posted_at);
            println!("  Payee:  {}", txn.payee);
            println!("  Splits: {}", txn.splits.len());
        }
    }

    Ok(())
}

fn parse_date(text: &str) -> BooksResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
        BooksError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", text))
    })
}

/// Split a `CATEGORY:AMOUNT` argument at its last colon
fn parse_split(arg: &str) -> BooksResult<(&str, f64)> {
    let (category, amount) = arg.rsplit_once(':').ok_or_else(|| {
        BooksError::Validation(format!("Invalid split '{}', expected CATEGORY:AMOUNT", arg))
    })?;

    let category = category.trim();
    if category.is_empty() {
        return Err(BooksError::Validation(format!(
            "Split '{}' has no category",
            arg
        )));
    }

    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|_| BooksError::Validation(format!("Invalid split amount in '{}'", arg)))?;

    Ok((category, amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_split() {
        assert_eq!(parse_split("Rent:-300").unwrap(), ("Rent", -300.0));
        assert_eq!(parse_split(" cat-4 : 12.5 ").unwrap(), ("cat-4", 12.5));
        assert_eq!(parse_split("Fees: Bank:5").unwrap(), ("Fees: Bank", 5.0));
    }

    #[test]
    fn test_parse_split_errors() {
        assert!(parse_split("Rent").unwrap_err().is_validation());
        assert!(parse_split(":10").unwrap_err().is_validation());
        assert!(parse_split("Rent:ten").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("02/29/2024").is_err());
    }
}
