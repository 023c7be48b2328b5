//! CSV export of the income statement
//!
//! One row per line item. The `section` column tells rows apart:
//! `summary` for the totals, `income`/`expense` for category totals and
//! `month` for the monthly breakdown. Columns that don't apply to a section
//! are left empty.

use std::io::Write;

use serde::Serialize;

use crate::error::{BooksError, BooksResult};
use crate::reports::IncomeStatement;

#[derive(Debug, Serialize)]
struct Row<'a> {
    section: &'a str,
    key: String,
    label: &'a str,
    income: Option<String>,
    expenses: Option<String>,
    net: Option<String>,
    total: Option<String>,
}

impl<'a> Row<'a> {
    fn total(section: &'a str, key: impl Into<String>, label: &'a str, total: f64) -> Self {
        Self {
            section,
            key: key.into(),
            label,
            income: None,
            expenses: None,
            net: None,
            total: Some(money(total)),
        }
    }
}

fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Write the income statement as CSV
pub fn export_income_statement_csv<W: Write>(
    report: &IncomeStatement,
    writer: &mut W,
) -> BooksResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let period = report.period_label.as_deref().unwrap_or("");
    let summary = [
        ("total_income", "Total income", report.total_income),
        ("total_expenses", "Total expenses", report.total_expenses),
        ("net_income", "Net income", report.net_income),
    ];
    for (key, label, total) in summary {
        wtr.serialize(Row::total("summary", key, label, total))?;
    }
    wtr.serialize(Row {
        section: "summary",
        key: "period".into(),
        label: period,
        income: None,
        expenses: None,
        net: None,
        total: None,
    })?;

    for line in &report.income_by_category {
        wtr.serialize(Row::total(
            "income",
            line.category_id.value().to_string(),
            &line.category_name,
            line.total,
        ))?;
    }

    for line in &report.expenses_by_category {
        wtr.serialize(Row::total(
            "expense",
            line.category_id.value().to_string(),
            &line.category_name,
            line.total,
        ))?;
    }

    for month in &report.monthly_breakdown {
        wtr.serialize(Row {
            section: "month",
            key: month.key.clone(),
            label: &month.label,
            income: Some(money(month.income)),
            expenses: Some(money(month.expenses)),
            net: Some(money(month.net_income)),
            total: None,
        })?;
    }

    wtr.flush().map_err(|e| BooksError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryKind, Transaction};

    #[test]
    fn test_csv_rows() {
        let categories = vec![
            Category::new(1, "Sales", CategoryKind::Income),
            Category::new(2, "Rent, Office", CategoryKind::Expense),
        ];
        let transactions = vec![
            Transaction::new(1, "2024-01-05").with_split(1, 1000.0),
            Transaction::new(2, "2024-02-20").with_split(2, -300.0),
        ];
        let report = IncomeStatement::build(&categories, &transactions).unwrap();

        let mut buffer = Vec::new();
        export_income_statement_csv(&report, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "section,key,label,income,expenses,net,total");
        assert_eq!(lines[1], "summary,total_income,Total income,,,,1000.00");
        assert_eq!(lines[3], "summary,net_income,Net income,,,,700.00");
        assert_eq!(lines[4], "summary,period,Jan 2024 – Feb 2024,,,,");
        assert_eq!(lines[5], "income,1,Sales,,,,1000.00");
        assert_eq!(lines[6], "expense,2,\"Rent, Office\",,,,300.00");
        assert_eq!(lines[7], "month,2024-01,Jan 2024,1000.00,0.00,1000.00,");
        assert_eq!(lines[8], "month,2024-02,Feb 2024,0.00,300.00,-300.00,");
    }
}
