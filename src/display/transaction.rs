//! Transaction display formatting
//!
//! Register and detail views for transactions.

use std::collections::HashMap;

use super::{format_amount, truncate};
use crate::models::{Category, CategoryId, Transaction};

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, currency: &str, date_format: &str) -> String {
    let split_indicator = if txn.is_split() {
        format!(" [{}]", txn.splits.len())
    } else {
        String::new()
    };

    let payee_display = if txn.payee.is_empty() {
        "(no payee)"
    } else {
        &txn.payee
    };

    let date = txn
        .posted_date()
        .map(|d| d.format(date_format).to_string())
        .unwrap_or_else(|| txn.posted_at.clone());

    format!(
        "{:<8} {:10} {} {:>12}{}",
        txn.id.to_string(),
        date,
        truncate(payee_display, 20),
        format_amount(txn.amount, currency),
        split_indicator
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(
    transactions: &[Transaction],
    currency: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8} {:10} {:20} {:>12}\n",
        "ID", "Date", "Payee", "Amount"
    ));
    output.push_str(&"-".repeat(54));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, currency, date_format));
        output.push('\n');
    }

    output
}

/// Format transaction details, resolving split categories by name
pub fn format_transaction_details(
    txn: &Transaction,
    categories: &[Category],
    currency: &str,
) -> String {
    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.posted_at));
    output.push_str(&format!("Amount:      {}\n", format_amount(txn.amount, currency)));
    output.push_str(&format!("Payee:       {}\n", txn.payee));

    if let Some(account) = txn.account_name.as_deref() {
        output.push_str(&format!("Account:     {}\n", account));
    } else if let Some(account_id) = txn.account_id {
        output.push_str(&format!("Account:     {}\n", account_id));
    }

    if let Some(vendor) = txn.vendor_name.as_deref() {
        output.push_str(&format!("Vendor:      {}\n", vendor));
    }

    if let Some(memo) = txn.memo.as_deref() {
        output.push_str(&format!("Memo:        {}\n", memo));
    }

    output.push_str("\nSplits:\n");
    for (i, split) in txn.splits.iter().enumerate() {
        let category = split
            .category_id
            .and_then(|id| names.get(&id).copied())
            .unwrap_or("(unknown)");
        let memo_part = split
            .memo
            .as_deref()
            .map(|m| format!(" - {}", m))
            .unwrap_or_default();
        output.push_str(&format!(
            "  {}. {} to {}{}\n",
            i + 1,
            format_amount(split.amount, currency),
            category,
            memo_part
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryKind;

    #[test]
    fn test_empty_register() {
        assert_eq!(
            format_transaction_register(&[], "$", "%Y-%m-%d"),
            "No transactions found.\n"
        );
    }

    #[test]
    fn test_register_row() {
        let mut txn = Transaction::new(3, "2024-01-20").with_split(2, -300.0);
        txn.payee = "Landlord".into();
        txn.amount = -300.0;

        let output = format_transaction_register(&[txn], "$", "%d/%m/%Y");
        assert!(output.contains("txn-3"));
        assert!(output.contains("20/01/2024"));
        assert!(output.contains("Landlord"));
        assert!(output.contains("-$300.00"));
    }

    #[test]
    fn test_unparsable_date_shown_raw() {
        let txn = Transaction::new(1, "someday");
        let row = format_transaction_row(&txn, "$", "%Y-%m-%d");
        assert!(row.contains("someday"));
        assert!(row.contains("(no payee)"));
    }

    #[test]
    fn test_details_resolve_category_names() {
        let categories = vec![Category::new(2, "Rent", CategoryKind::Expense)];
        let txn = Transaction::new(1, "2024-01-20")
            .with_split(2, -250.0)
            .with_split(9, -50.0);

        let details = format_transaction_details(&txn, &categories, "$");
        assert!(details.contains("1. -$250.00 to Rent"));
        assert!(details.contains("2. -$50.00 to (unknown)"));
    }
}
