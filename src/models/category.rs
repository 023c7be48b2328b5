//! Category model
//!
//! Categories classify transaction splits. They form a hierarchy through an
//! optional parent reference and carry a kind that decides whether they take
//! part in the income statement.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{BusinessId, CategoryId};

/// Closed classification of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryKind {
    Income,
    Expense,
    Asset,
    Liability,
    Equity,
    Transfer,
    #[default]
    Other,
}

impl CategoryKind {
    /// Get all kinds in declaration order
    pub fn all() -> &'static [Self] {
        &[
            Self::Income,
            Self::Expense,
            Self::Asset,
            Self::Liability,
            Self::Equity,
            Self::Transfer,
            Self::Other,
        ]
    }

    /// The wire name (e.g. `INCOME`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Transfer => "TRANSFER",
            Self::Other => "OTHER",
        }
    }

    /// Title-case label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Asset => "Asset",
            Self::Liability => "Liability",
            Self::Equity => "Equity",
            Self::Transfer => "Transfer",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CategoryKind {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CategoryValidationError::BlankKind);
        }
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CategoryValidationError::UnknownKind(s.to_string()))
    }
}

/// A category record as served by the bookkeeping API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier within the business
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owning business
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_id: Option<BusinessId>,

    /// Parent category; absent for a root
    #[serde(default)]
    pub parent_category_id: Option<CategoryId>,

    /// Classification
    #[serde(default)]
    pub kind: CategoryKind,

    /// Whether the category is active
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Category {
    /// Create a new active root category
    pub fn new(id: i64, name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id: CategoryId::new(id),
            name: name.into(),
            description: None,
            business_id: None,
            parent_category_id: None,
            kind,
            active: true,
        }
    }

    /// Builder-style setter for the parent reference
    pub fn with_parent(mut self, parent: i64) -> Self {
        self.parent_category_id = Some(CategoryId::new(parent));
        self
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    BlankKind,
    UnknownKind(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name is required"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 100)", len)
            }
            Self::BlankKind => write!(f, "Category kind must not be blank"),
            Self::UnknownKind(kind) => write!(f, "Unknown category kind: {}", kind),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!("income".parse::<CategoryKind>().unwrap(), CategoryKind::Income);
        assert_eq!(" Expense ".parse::<CategoryKind>().unwrap(), CategoryKind::Expense);
        assert_eq!("TRANSFER".parse::<CategoryKind>().unwrap(), CategoryKind::Transfer);
    }

    #[test]
    fn test_kind_parse_errors() {
        assert_eq!(
            "  ".parse::<CategoryKind>().unwrap_err(),
            CategoryValidationError::BlankKind
        );
        assert!(matches!(
            "revenue".parse::<CategoryKind>(),
            Err(CategoryValidationError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(CategoryKind::Liability.label(), "Liability");
        assert_eq!(CategoryKind::Equity.to_string(), "Equity");
    }

    #[test]
    fn test_deserialize_api_shape() {
        let json = r#"{
            "id": 5,
            "name": "Office Supplies",
            "description": null,
            "businessId": 1,
            "parentCategoryId": 2,
            "kind": "EXPENSE",
            "active": false
        }"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.id, CategoryId::new(5));
        assert_eq!(category.parent_category_id, Some(CategoryId::new(2)));
        assert_eq!(category.kind, CategoryKind::Expense);
        assert_eq!(category.business_id, Some(BusinessId::new(1)));
        assert!(!category.active);
    }

    #[test]
    fn test_deserialize_defaults() {
        let category: Category = serde_json::from_str(r#"{"id": 1, "name": "Misc"}"#).unwrap();
        assert_eq!(category.kind, CategoryKind::Other);
        assert!(category.active);
        assert!(category.parent_category_id.is_none());
    }

    #[test]
    fn test_validation() {
        assert!(Category::new(1, "Sales", CategoryKind::Income).validate().is_ok());
        assert_eq!(
            Category::new(1, "   ", CategoryKind::Income).validate(),
            Err(CategoryValidationError::EmptyName)
        );
        assert!(matches!(
            Category::new(1, "x".repeat(101), CategoryKind::Other).validate(),
            Err(CategoryValidationError::NameTooLong(101))
        ));
    }
}
