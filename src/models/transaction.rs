//! Transaction model
//!
//! A transaction posts a signed amount to an account and distributes its
//! effect across categories through one or more splits. Records mirror the
//! bookkeeping API's JSON shape; posting dates are kept as the raw text the
//! source supplied and parsed on demand.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::ids::{AccountId, BusinessId, CategoryId, TransactionId, VendorId};

/// A single (category, amount) allocation within a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSplit {
    /// Category this portion is assigned to
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Signed amount; NaN when the source value was not numeric
    #[serde(default = "missing_amount", deserialize_with = "deserialize_amount")]
    pub amount: f64,

    /// Optional memo for this split
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl TransactionSplit {
    /// Create a new split
    pub fn new(category_id: CategoryId, amount: f64) -> Self {
        Self {
            category_id: Some(category_id),
            amount,
            memo: None,
        }
    }

    /// Whether the amount can contribute to a total
    pub fn has_usable_amount(&self) -> bool {
        self.amount.is_finite() && self.amount != 0.0
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Owning business
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_id: Option<BusinessId>,

    /// Account the transaction posted to
    #[serde(default)]
    pub account_id: Option<AccountId>,

    /// Account name, when the source denormalized it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,

    /// Payee
    #[serde(default)]
    pub payee: String,

    /// Memo/notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,

    /// Posting date as supplied (e.g. "2024-01-15" or an RFC 3339 timestamp)
    #[serde(default)]
    pub posted_at: String,

    /// Total signed amount
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: f64,

    /// Vendor reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<VendorId>,

    /// Vendor name, when the source denormalized it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,

    /// Category allocations
    #[serde(default)]
    pub splits: Vec<TransactionSplit>,

    /// When the transaction was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the transaction was last modified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Create a transaction with no splits
    pub fn new(id: i64, posted_at: impl Into<String>) -> Self {
        Self {
            id: TransactionId::new(id),
            business_id: None,
            account_id: None,
            account_name: None,
            payee: String::new(),
            memo: None,
            posted_at: posted_at.into(),
            amount: 0.0,
            vendor_id: None,
            vendor_name: None,
            splits: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Builder-style helper appending a split
    pub fn with_split(mut self, category_id: i64, amount: f64) -> Self {
        self.splits
            .push(TransactionSplit::new(CategoryId::new(category_id), amount));
        self
    }

    /// Calendar date of posting, if the source text is parseable
    pub fn posted_date(&self) -> Option<NaiveDate> {
        parse_posted_date(&self.posted_at)
    }

    /// Check if this transaction spreads across several categories
    pub fn is_split(&self) -> bool {
        self.splits.len() > 1
    }
}

/// Parse a posting date in any of the shapes the API emits.
///
/// Timestamps resolve to the calendar date written in them; the offset is
/// not converted to another zone.
pub fn parse_posted_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|timestamp| timestamp.date())
}

fn missing_amount() -> f64 {
    f64::NAN
}

/// Accept numbers and numeric strings; anything else becomes NaN.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => value,
        RawAmount::Text(text) => text.trim().parse().unwrap_or(f64::NAN),
        RawAmount::Other(_) => f64::NAN,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_posted_date("2024-01-15"), Some(date(2024, 1, 15)));
        assert_eq!(parse_posted_date(" 2024-01-15 "), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_parse_timestamps() {
        assert_eq!(
            parse_posted_date("2024-01-31T23:30:00-05:00"),
            Some(date(2024, 1, 31))
        );
        assert_eq!(
            parse_posted_date("2024-02-01T08:00:00Z"),
            Some(date(2024, 2, 1))
        );
        assert_eq!(
            parse_posted_date("2024-02-01T08:00:00"),
            Some(date(2024, 2, 1))
        );
        assert_eq!(
            parse_posted_date("2024-02-01 08:00:00.250"),
            Some(date(2024, 2, 1))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_posted_date(""), None);
        assert_eq!(parse_posted_date("yesterday"), None);
        assert_eq!(parse_posted_date("2024-02-30"), None);
    }

    #[test]
    fn test_deserialize_api_shape() {
        let json = r#"{
            "id": 9,
            "businessId": 1,
            "accountId": 3,
            "accountName": "Checking",
            "payee": "Landlord",
            "memo": null,
            "postedAt": "2024-01-20",
            "amount": -300.0,
            "vendorId": null,
            "splits": [
                {"categoryId": 2, "amount": -250, "memo": "base"},
                {"categoryId": 4, "amount": "-50.00"}
            ]
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.id, TransactionId::new(9));
        assert_eq!(txn.account_id, Some(AccountId::new(3)));
        assert_eq!(txn.posted_date(), Some(date(2024, 1, 20)));
        assert!(txn.is_split());
        assert_eq!(txn.splits[0].amount, -250.0);
        assert_eq!(txn.splits[0].memo.as_deref(), Some("base"));
        assert_eq!(txn.splits[1].amount, -50.0);
    }

    #[test]
    fn test_non_numeric_amounts_become_nan() {
        let json = r#"[
            {"categoryId": 1, "amount": "abc"},
            {"categoryId": 1, "amount": null},
            {"categoryId": 1},
            {"categoryId": 1, "amount": true},
            {"categoryId": 1, "amount": 0}
        ]"#;
        let splits: Vec<TransactionSplit> = serde_json::from_str(json).unwrap();
        assert!(splits[..4].iter().all(|s| s.amount.is_nan()));
        assert!(splits.iter().all(|s| !s.has_usable_amount()));
    }

    #[test]
    fn test_builder() {
        let txn = Transaction::new(1, "2024-03-01").with_split(7, 12.5);
        assert_eq!(txn.splits.len(), 1);
        assert!(!txn.is_split());
        assert_eq!(txn.splits[0].category_id, Some(CategoryId::new(7)));
        assert!(txn.splits[0].has_usable_amount());
    }
}
