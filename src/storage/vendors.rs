//! Vendor repository for JSON storage
//!
//! Manages loading and saving a business's vendors to vendors.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::info;

use crate::error::BooksError;
use crate::models::{BusinessId, Vendor, VendorId};

use super::file_io::write_json_atomic;
use super::read_records;

/// Repository for vendor persistence
pub struct VendorRepository {
    path: PathBuf,
    business_id: BusinessId,
    data: RwLock<HashMap<VendorId, Vendor>>,
}

impl VendorRepository {
    /// Create a new vendor repository
    pub fn new(path: PathBuf, business_id: BusinessId) -> Self {
        Self {
            path,
            business_id,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load vendors from disk
    pub fn load(&self) -> Result<(), BooksError> {
        let records: Vec<Vendor> =
            read_records(&self.path, self.business_id, "vendor", |v: &Vendor| {
                v.business_id
            })?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for vendor in records {
            data.entry(vendor.id).or_insert(vendor);
        }

        info!(business = %self.business_id, count = data.len(), "loaded vendors");
        Ok(())
    }

    /// Save vendors to disk
    pub fn save(&self) -> Result<(), BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by_key(|v| v.id);

        write_json_atomic(&self.path, &list)?;
        info!(business = %self.business_id, count = list.len(), "saved vendors");
        Ok(())
    }

    /// Get a vendor by ID
    pub fn get(&self, id: VendorId) -> Result<Option<Vendor>, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all vendors sorted by name
    pub fn get_all(&self) -> Result<Vec<Vendor>, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        Ok(list)
    }

    /// Get a vendor by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Vendor>, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .filter(|v| v.name.to_lowercase() == name_lower)
            .min_by_key(|v| v.id)
            .cloned())
    }

    /// Insert or update a vendor
    pub fn upsert(&self, vendor: Vendor) -> Result<(), BooksError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(vendor.id, vendor);
        Ok(())
    }

    /// Next free id: one more than the largest existing id
    pub fn next_id(&self) -> Result<VendorId, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let max = data.keys().map(|id| id.value()).max().unwrap_or(0);
        Ok(VendorId::new(max + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_upsert_save_reload() {
        let temp_dir = TempDir::new().unwrap();
        let repo = VendorRepository::new(temp_dir.path().join("vendors.json"), BusinessId::new(1));
        repo.load().unwrap();

        let mut vendor = Vendor::new(4, "Paper Co");
        vendor.email = Some("orders@paper.example".into());
        repo.upsert(vendor).unwrap();
        repo.save().unwrap();

        repo.load().unwrap();
        let loaded = repo.get_by_name("paper co").unwrap().unwrap();
        assert_eq!(loaded.id, VendorId::new(4));
        assert_eq!(loaded.email.as_deref(), Some("orders@paper.example"));
        assert_eq!(repo.next_id().unwrap(), VendorId::new(5));
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }
}
