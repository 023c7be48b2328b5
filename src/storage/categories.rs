//! Category repository for JSON storage
//!
//! Manages loading and saving a business's categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::info;

use crate::error::BooksError;
use crate::models::{BusinessId, Category, CategoryId};

use super::file_io::write_json_atomic;
use super::read_records;

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    business_id: BusinessId,
    data: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf, business_id: BusinessId) -> Self {
        Self {
            path,
            business_id,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), BooksError> {
        let records: Vec<Category> =
            read_records(&self.path, self.business_id, "category", |c: &Category| {
                c.business_id
            })?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for category in records {
            data.entry(category.id).or_insert(category);
        }

        info!(business = %self.business_id, count = data.len(), "loaded categories");
        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by_key(|c| c.id);

        write_json_atomic(&self.path, &list)?;
        info!(business = %self.business_id, count = list.len(), "saved categories");
        Ok(())
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all categories in id order
    pub fn get_all(&self) -> Result<Vec<Category>, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by_key(|c| c.id);
        Ok(list)
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        let mut matches: Vec<_> = data
            .values()
            .filter(|c| c.name.to_lowercase() == name_lower)
            .collect();
        matches.sort_by_key(|c| c.id);
        Ok(matches.first().map(|c| (*c).clone()))
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), BooksError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(category.id, category);
        Ok(())
    }

    /// Next free id: one more than the largest existing id
    pub fn next_id(&self) -> Result<CategoryId, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let max = data.keys().map(|id| id.value()).max().unwrap_or(0);
        Ok(CategoryId::new(max + 1))
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, BooksError> {
        let data = self
            .data
            .read()
            .map_err(|e| BooksError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
