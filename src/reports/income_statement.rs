//! Income Statement
//!
//! Aggregates split amounts of income and expense categories into totals,
//! per-category breakdowns and a chronological monthly breakdown.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::display::format_amount;
use crate::models::{Category, CategoryId, CategoryKind, ReportMonth, Transaction};

/// Name used when a breakdown entry's category can no longer be resolved
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Joins the first and last month labels of a multi-month period
pub const PERIOD_SEPARATOR: &str = " – ";

/// Total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category_id: CategoryId,
    pub category_name: String,
    pub total: f64,
}

/// Income and expenses for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBreakdown {
    /// Zero-padded `YYYY-MM`
    pub key: String,
    /// Short label, e.g. "Jan 2024"
    pub label: String,
    pub income: f64,
    pub expenses: f64,
    pub net_income: f64,
}

/// Income statement for a set of transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Sum of income split amounts, signs preserved
    pub total_income: f64,
    /// Sum of absolute expense split amounts
    pub total_expenses: f64,
    pub net_income: f64,
    /// Span of months covered, absent when no month was seen
    pub period_label: Option<String>,
    /// Largest contributor first
    pub income_by_category: Vec<CategoryTotal>,
    /// Largest contributor first
    pub expenses_by_category: Vec<CategoryTotal>,
    /// Oldest month first
    pub monthly_breakdown: Vec<MonthlyBreakdown>,
}

#[derive(Debug, Default)]
struct MonthBucket {
    income: f64,
    expenses: f64,
}

/// Per-category sums that remember first-seen order for stable tie-breaking
#[derive(Debug, Default)]
struct CategorySums {
    order: Vec<CategoryId>,
    totals: HashMap<CategoryId, f64>,
}

impl CategorySums {
    fn add(&mut self, category_id: CategoryId, amount: f64) {
        match self.totals.entry(category_id) {
            Entry::Occupied(entry) => *entry.into_mut() += amount,
            Entry::Vacant(entry) => {
                self.order.push(category_id);
                entry.insert(amount);
            }
        }
    }

    fn into_totals(self, lookup: &HashMap<CategoryId, &Category>) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = self
            .order
            .into_iter()
            .map(|category_id| CategoryTotal {
                category_id,
                category_name: lookup
                    .get(&category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| UNCATEGORIZED.to_string()),
                total: self.totals.get(&category_id).copied().unwrap_or_default(),
            })
            .collect();

        totals.sort_by(|a, b| b.total.total_cmp(&a.total));
        totals
    }
}

impl IncomeStatement {
    /// Aggregate `transactions` against `categories`.
    ///
    /// Returns `None` when either input is empty or when no income or
    /// expense activity remains after skipping unusable records, so callers
    /// can tell "nothing to show" apart from a report of zeros.
    pub fn build(categories: &[Category], transactions: &[Transaction]) -> Option<Self> {
        if categories.is_empty() || transactions.is_empty() {
            return None;
        }

        let mut lookup: HashMap<CategoryId, &Category> = HashMap::with_capacity(categories.len());
        for category in categories {
            lookup.entry(category.id).or_insert(category);
        }

        let mut total_income = 0.0;
        let mut total_expenses = 0.0;
        let mut income = CategorySums::default();
        let mut expenses = CategorySums::default();
        let mut months: BTreeMap<ReportMonth, MonthBucket> = BTreeMap::new();

        for txn in transactions {
            let Some(date) = txn.posted_date() else {
                debug!(
                    transaction = %txn.id,
                    posted_at = %txn.posted_at,
                    "unparsable posting date, skipping transaction"
                );
                continue;
            };
            let bucket = months.entry(ReportMonth::containing(date)).or_default();

            for split in &txn.splits {
                let Some(category) = split.category_id.and_then(|id| lookup.get(&id)) else {
                    debug!(
                        transaction = %txn.id,
                        category = ?split.category_id,
                        "split category not found, skipping split"
                    );
                    continue;
                };

                if !split.has_usable_amount() {
                    debug!(
                        transaction = %txn.id,
                        amount = split.amount,
                        "split amount is zero or not a number, skipping split"
                    );
                    continue;
                }

                match category.kind {
                    CategoryKind::Income => {
                        total_income += split.amount;
                        bucket.income += split.amount;
                        income.add(category.id, split.amount);
                    }
                    CategoryKind::Expense => {
                        let amount = split.amount.abs();
                        total_expenses += amount;
                        bucket.expenses += amount;
                        expenses.add(category.id, amount);
                    }
                    CategoryKind::Asset
                    | CategoryKind::Liability
                    | CategoryKind::Equity
                    | CategoryKind::Transfer
                    | CategoryKind::Other => {}
                }
            }
        }

        if total_income == 0.0 && total_expenses == 0.0 {
            return None;
        }

        let monthly_breakdown: Vec<MonthlyBreakdown> = months
            .into_iter()
            .map(|(month, bucket)| MonthlyBreakdown {
                key: month.key(),
                label: month.label(),
                income: bucket.income,
                expenses: bucket.expenses,
                net_income: bucket.income - bucket.expenses,
            })
            .collect();

        let period_label = match monthly_breakdown.as_slice() {
            [] => None,
            [only] => Some(only.label.clone()),
            [first, .., last] => Some(format!(
                "{}{}{}",
                first.label, PERIOD_SEPARATOR, last.label
            )),
        };

        Some(Self {
            total_income,
            total_expenses,
            net_income: total_income - total_expenses,
            period_label,
            income_by_category: income.into_totals(&lookup),
            expenses_by_category: expenses.into_totals(&lookup),
            monthly_breakdown,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Income Statement");
        if let Some(period) = &self.period_label {
            output.push_str(&format!(": {}", period));
        }
        output.push('\n');
        output.push_str(&"=".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<40} {:>20}\n",
            "Total Income",
            format_amount(self.total_income, currency)
        ));
        output.push_str(&format!(
            "{:<40} {:>20}\n",
            "Total Expenses",
            format_amount(self.total_expenses, currency)
        ));
        output.push_str(&format!(
            "{:<40} {:>20}\n",
            "Net Income",
            format_amount(self.net_income, currency)
        ));

        for (title, rows) in [
            ("INCOME", &self.income_by_category),
            ("EXPENSES", &self.expenses_by_category),
        ] {
            output.push('\n');
            output.push_str(&format!("{}\n", title));
            output.push_str(&"-".repeat(64));
            output.push('\n');
            if rows.is_empty() {
                output.push_str("  (none)\n");
            }
            for row in rows {
                output.push_str(&format!(
                    "  {:<38} {:>20}\n",
                    row.category_name,
                    format_amount(row.total, currency)
                ));
            }
        }

        output.push('\n');
        output.push_str(&format!(
            "{:<12} {:>16} {:>16} {:>16}\n",
            "Month", "Income", "Expenses", "Net"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');
        for month in &self.monthly_breakdown {
            output.push_str(&format!(
                "{:<12} {:>16} {:>16} {:>16}\n",
                month.label,
                format_amount(month.income, currency),
                format_amount(month.expenses, currency),
                format_amount(month.net_income, currency)
            ));
        }

        output
    }
}

/// Build an income statement; see [`IncomeStatement::build`].
pub fn build_income_statement(
    categories: &[Category],
    transactions: &[Transaction],
) -> Option<IncomeStatement> {
    IncomeStatement::build(categories, transactions)
}
