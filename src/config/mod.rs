//! Configuration module for bizbooks
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BooksPaths;
pub use settings::Settings;
