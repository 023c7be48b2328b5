//! Export module for bizbooks
//!
//! Writes the income statement in machine-readable formats:
//! - JSON: the report wrapped with export metadata
//! - YAML: the same document with a comment header
//! - CSV: one row per line item (spreadsheet-compatible)

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_income_statement_csv;
pub use json::{
    export_income_statement_json, read_income_statement_json, ReportExport, EXPORT_SCHEMA_VERSION,
};
pub use yaml::export_income_statement_yaml;
