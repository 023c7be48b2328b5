//! Vendor service
//!
//! Provides business logic for a business's vendors.

use chrono::Utc;
use tracing::info;

use crate::error::{BooksError, BooksResult};
use crate::models::{Vendor, VendorId};
use crate::storage::Storage;

/// Service for vendor management
pub struct VendorService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new vendor
#[derive(Debug, Clone)]
pub struct NewVendor {
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
}

impl NewVendor {
    /// An active vendor with no contact details
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact_name: None,
            email: None,
            phone: None,
            active: true,
        }
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

impl<'a> VendorService<'a> {
    /// Create a new vendor service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new vendor
    pub fn create(&self, input: NewVendor) -> BooksResult<Vendor> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(BooksError::Validation("Vendor name cannot be empty".into()));
        }

        if self.storage.vendors.get_by_name(name)?.is_some() {
            return Err(BooksError::Duplicate {
                entity_type: "Vendor",
                identifier: name.to_string(),
            });
        }

        let id = self.storage.vendors.next_id()?;
        let now = Utc::now();

        let mut vendor = Vendor::new(id.value(), name);
        vendor.business_id = Some(self.storage.business_id());
        vendor.contact_name = non_blank(input.contact_name);
        vendor.email = non_blank(input.email);
        vendor.phone = non_blank(input.phone);
        vendor.active = input.active;
        vendor.created_at = Some(now);
        vendor.updated_at = Some(now);

        vendor
            .validate()
            .map_err(|e| BooksError::Validation(e.to_string()))?;

        self.storage.vendors.upsert(vendor.clone())?;
        self.storage.vendors.save()?;

        info!(vendor = %vendor.id, name = %vendor.name, "created vendor");
        Ok(vendor)
    }

    /// Find a vendor by ID (`7` or `ven-7`) or by name
    pub fn find(&self, identifier: &str) -> BooksResult<Option<Vendor>> {
        if let Ok(id) = identifier.parse::<VendorId>() {
            if let Some(vendor) = self.storage.vendors.get(id)? {
                return Ok(Some(vendor));
            }
        }

        self.storage.vendors.get_by_name(identifier.trim())
    }

    /// All vendors sorted by name
    pub fn list(&self) -> BooksResult<Vec<Vendor>> {
        self.storage.vendors.get_all()
    }
}
