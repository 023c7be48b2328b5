//! Display formatting for terminal output
//!
//! Provides utilities for formatting accounts, vendors, categories,
//! transactions and amounts for terminal display.

pub mod account;
pub mod category;
pub mod transaction;
pub mod vendor;

pub use account::format_account_list;
pub use category::{
    format_category_details, format_category_list, format_category_options, format_category_tree,
};
pub use transaction::{format_transaction_details, format_transaction_register};
pub use vendor::format_vendor_list;

/// Format an amount with a currency symbol and two decimals (e.g. `-$12.50`)
pub fn format_amount(amount: f64, symbol: &str) -> String {
    if !amount.is_finite() {
        return "n/a".to_string();
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}{:.2}", sign, symbol, amount.abs())
}

/// Pad or cut a string to exactly `max_len` characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1000.0, "$"), "$1000.00");
        assert_eq!(format_amount(-12.5, "$"), "-$12.50");
        assert_eq!(format_amount(0.0, "€"), "€0.00");
        assert_eq!(format_amount(f64::NAN, "$"), "n/a");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Rent", 6), "Rent  ");
        assert_eq!(truncate("Office Supplies", 8), "Offic...");
        assert_eq!(truncate("Café Crème Brûlée", 7), "Café...");
    }
}
