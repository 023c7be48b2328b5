//! Report CLI commands

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::error::{BooksError, BooksResult};
use crate::export::{
    export_income_statement_csv, export_income_statement_json, export_income_statement_yaml,
    ReportExport,
};
use crate::reports::IncomeStatement;
use crate::storage::Storage;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable tables
    Terminal,
    /// JSON document with export metadata
    Json,
    /// YAML document with export metadata
    Yaml,
    /// One CSV row per line item
    Csv,
}

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income statement: income and expense totals by category and month
    Income {
        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: ReportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> BooksResult<()> {
    match cmd {
        ReportCommands::Income { format, output } => {
            let categories = storage.categories.get_all()?;
            let mut transactions = storage.transactions.get_all()?;
            // Oldest first, so ties in the breakdowns follow posting order
            transactions.reverse();

            let Some(report) = IncomeStatement::build(&categories, &transactions) else {
                println!("No income or expense activity to report.");
                return Ok(());
            };

            let mut writer = open_output(output.as_deref())?;
            match format {
                ReportFormat::Terminal => {
                    write!(writer, "{}", report.format_terminal(&settings.currency_symbol))
                        .map_err(|e| BooksError::Export(e.to_string()))?;
                }
                ReportFormat::Json => {
                    let export = ReportExport::new(storage.business_id(), report);
                    export_income_statement_json(&export, &mut writer)?;
                }
                ReportFormat::Yaml => {
                    let export = ReportExport::new(storage.business_id(), report);
                    export_income_statement_yaml(&export, &mut writer)?;
                }
                ReportFormat::Csv => {
                    export_income_statement_csv(&report, &mut writer)?;
                }
            }
            writer
                .flush()
                .map_err(|e| BooksError::Export(e.to_string()))?;

            if let Some(path) = output {
                println!("Income statement written to: {}", path.display());
            }
        }
    }

    Ok(())
}

fn open_output(output: Option<&Path>) -> BooksResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                BooksError::Export(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
