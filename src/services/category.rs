//! Category service
//!
//! Business logic for a business's categories: listing, the parent/child
//! hierarchy views and validated creation.

use tracing::info;

use crate::error::{BooksError, BooksResult};
use crate::models::{Category, CategoryId, CategoryKind};
use crate::services::hierarchy::{build_options, build_tree, CategoryNode, CategoryOption};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub parent_category_id: Option<CategoryId>,
    pub kind: CategoryKind,
    pub active: bool,
}

impl NewCategory {
    /// An active root category with no description
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            parent_category_id: None,
            kind,
            active: true,
        }
    }
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All categories ordered by name (case-insensitive)
    pub fn list(&self) -> BooksResult<Vec<Category>> {
        let mut categories = self.storage.categories.get_all()?;
        categories.sort_by_cached_key(|c| c.name.to_lowercase());
        Ok(categories)
    }

    /// Categories arranged as a name-sorted forest
    pub fn tree(&self) -> BooksResult<Vec<CategoryNode>> {
        Ok(build_tree(&self.list()?))
    }

    /// Indented pre-order list for choosing a parent
    pub fn parent_options(&self) -> BooksResult<Vec<CategoryOption>> {
        Ok(build_options(&self.tree()?))
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> BooksResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by ID (`12` or `cat-12`) or by name
    pub fn find(&self, identifier: &str) -> BooksResult<Option<Category>> {
        if let Ok(id) = identifier.parse::<CategoryId>() {
            if let Some(category) = self.storage.categories.get(id)? {
                return Ok(Some(category));
            }
        }

        self.storage.categories.get_by_name(identifier.trim())
    }

    /// Create a new category
    pub fn create(&self, input: NewCategory) -> BooksResult<Category> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(BooksError::Validation("Category name cannot be empty".into()));
        }

        if self.storage.categories.get_by_name(name)?.is_some() {
            return Err(BooksError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        if let Some(parent_id) = input.parent_category_id {
            if self.storage.categories.get(parent_id)?.is_none() {
                return Err(BooksError::Validation(format!(
                    "Parent category {} does not exist",
                    parent_id
                )));
            }
        }

        let id = self.storage.categories.next_id()?;
        let mut category = Category::new(id.value(), name, input.kind);
        category.business_id = Some(self.storage.business_id());
        category.parent_category_id = input.parent_category_id;
        category.active = input.active;
        category.description = input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        category
            .validate()
            .map_err(|e| BooksError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        info!(category = %category.id, name = %category.name, "created category");
        Ok(category)
    }

    /// Count categories
    pub fn count(&self) -> BooksResult<usize> {
        self.storage.categories.count()
    }
}
