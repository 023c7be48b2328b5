//! JSON export of the income statement
//!
//! Wraps the report with export metadata so a saved file says where and when
//! it came from.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BooksError, BooksResult};
use crate::models::BusinessId;
use crate::reports::IncomeStatement;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// An income statement with export metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Business the report covers
    pub business_id: BusinessId,

    pub report: IncomeStatement,
}

impl ReportExport {
    /// Wrap a report for export, stamped with the current time
    pub fn new(business_id: BusinessId, report: IncomeStatement) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            business_id,
            report,
        }
    }

    /// Check that the export was written by a compatible schema
    pub fn validate(&self) -> Result<(), String> {
        let major = |v: &str| v.split('.').next().map(str::to_string);
        if major(&self.schema_version) != major(EXPORT_SCHEMA_VERSION) {
            return Err(format!(
                "Incompatible schema version: {} (expected {})",
                self.schema_version, EXPORT_SCHEMA_VERSION
            ));
        }
        Ok(())
    }
}

/// Write the export as pretty-printed JSON
pub fn export_income_statement_json<W: Write>(
    export: &ReportExport,
    writer: &mut W,
) -> BooksResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| BooksError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BooksError::Export(e.to_string()))?;
    Ok(())
}

/// Read an export back from JSON
pub fn read_income_statement_json(json: &str) -> BooksResult<ReportExport> {
    let export: ReportExport =
        serde_json::from_str(json).map_err(|e| BooksError::Export(e.to_string()))?;
    export.validate().map_err(BooksError::Export)?;
    Ok(export)
}
