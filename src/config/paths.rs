//! Path management for bizbooks
//!
//! Provides XDG-compliant path resolution for configuration and per-business data.
//!
//! ## Path Resolution Order
//!
//! 1. `BIZBOOKS_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/bizbooks` or `~/.config/bizbooks`
//! 3. Windows: `%APPDATA%\bizbooks`

use std::path::PathBuf;

use crate::error::BooksError;
use crate::models::BusinessId;

/// Manages all paths used by bizbooks
#[derive(Debug, Clone)]
pub struct BooksPaths {
    base_dir: PathBuf,
}

impl BooksPaths {
    /// Create a new BooksPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, BooksError> {
        let base_dir = if let Ok(custom) = std::env::var("BIZBOOKS_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BooksPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/bizbooks/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/bizbooks/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Directory holding one business's snapshots
    pub fn business_dir(&self, business_id: BusinessId) -> PathBuf {
        self.data_dir()
            .join("businesses")
            .join(business_id.value().to_string())
    }

    /// Get the path to a business's accounts.json
    pub fn accounts_file(&self, business_id: BusinessId) -> PathBuf {
        self.business_dir(business_id).join("accounts.json")
    }

    /// Get the path to a business's vendors.json
    pub fn vendors_file(&self, business_id: BusinessId) -> PathBuf {
        self.business_dir(business_id).join("vendors.json")
    }

    /// Get the path to a business's categories.json
    pub fn categories_file(&self, business_id: BusinessId) -> PathBuf {
        self.business_dir(business_id).join("categories.json")
    }

    /// Get the path to a business's transactions.json
    pub fn transactions_file(&self, business_id: BusinessId) -> PathBuf {
        self.business_dir(business_id).join("transactions.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BooksError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BooksError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BooksError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BooksError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("bizbooks"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| BooksError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("bizbooks"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BooksError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BooksError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("bizbooks"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BooksPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_business_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BooksPaths::with_base_dir(temp_dir.path().to_path_buf());
        let business = BusinessId::new(7);

        assert_eq!(
            paths.categories_file(business),
            temp_dir
                .path()
                .join("data")
                .join("businesses")
                .join("7")
                .join("categories.json")
        );
        assert_eq!(
            paths.transactions_file(business).file_name().unwrap(),
            "transactions.json"
        );
        assert_eq!(
            paths.accounts_file(business).parent(),
            paths.vendors_file(business).parent()
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BooksPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
    }
}
