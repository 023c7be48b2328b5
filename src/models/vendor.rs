//! Vendor model
//!
//! Vendors are the businesses and people a company buys from. A transaction
//! may point at one through its vendor id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BusinessId, VendorId};

/// A vendor record as served by the bookkeeping API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: VendorId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_id: Option<BusinessId>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Vendor {
    /// Create a new active vendor with no contact details
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: VendorId::new(id),
            business_id: None,
            name: name.into(),
            contact_name: None,
            email: None,
            phone: None,
            active: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// Validate the vendor
    pub fn validate(&self) -> Result<(), VendorValidationError> {
        if self.name.trim().is_empty() {
            return Err(VendorValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(VendorValidationError::NameTooLong(self.name.len()));
        }

        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(VendorValidationError::InvalidEmail(email.clone()));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for vendors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidEmail(String),
}

impl fmt::Display for VendorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Vendor name is required"),
            Self::NameTooLong(len) => write!(f, "Vendor name too long ({} chars, max 100)", len),
            Self::InvalidEmail(email) => write!(f, "Invalid vendor email: {}", email),
        }
    }
}

impl std::error::Error for VendorValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_defaults() {
        let vendor: Vendor = serde_json::from_str(r#"{"id": 9, "name": "Paper Co"}"#).unwrap();
        assert_eq!(vendor.id, VendorId::new(9));
        assert!(vendor.active);
        assert!(vendor.email.is_none());
    }

    #[test]
    fn test_validation() {
        let mut vendor = Vendor::new(1, "Paper Co");
        assert!(vendor.validate().is_ok());

        vendor.email = Some("orders.paperco.example".into());
        assert!(matches!(
            vendor.validate(),
            Err(VendorValidationError::InvalidEmail(_))
        ));

        assert_eq!(
            Vendor::new(2, "").validate(),
            Err(VendorValidationError::EmptyName)
        );
    }
}
