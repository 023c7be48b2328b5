//! YAML export of the income statement

use std::io::Write;

use crate::error::{BooksError, BooksResult};
use crate::export::json::ReportExport;

/// Write the export as YAML with a comment header
pub fn export_income_statement_yaml<W: Write>(
    export: &ReportExport,
    writer: &mut W,
) -> BooksResult<()> {
    let period = export
        .report
        .period_label
        .as_deref()
        .unwrap_or("no dated activity");

    writeln!(writer, "# bizbooks income statement").map_err(|e| BooksError::Export(e.to_string()))?;
    writeln!(writer, "# Business: {}", export.business_id)
        .map_err(|e| BooksError::Export(e.to_string()))?;
    writeln!(writer, "# Period: {}", period).map_err(|e| BooksError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| BooksError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| BooksError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BooksError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| BooksError::Export(e.to_string()))?;

    Ok(())
}
