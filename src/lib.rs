//! bizbooks - Category hierarchies and income statements for small businesses
//!
//! This library provides the core of the bizbooks bookkeeping tool. It turns
//! a business's flat category list into a name-sorted parent/child forest
//! and aggregates split-level transactions into an income statement with
//! category rankings and a monthly trend.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (categories, transactions, splits, months)
//! - `storage`: Per-business JSON snapshot storage
//! - `services`: Business logic, including the category hierarchy builder
//! - `reports`: The income statement aggregator
//! - `display`: Terminal formatting
//! - `export`: JSON, YAML and CSV report export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use bizbooks::models::{Category, CategoryKind, Transaction};
//! use bizbooks::reports::IncomeStatement;
//!
//! let categories = vec![Category::new(1, "Sales", CategoryKind::Income)];
//! let transactions = vec![Transaction::new(1, "2024-01-05").with_split(1, 250.0)];
//! let report = IncomeStatement::build(&categories, &transactions);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BooksError, BooksResult};
