//! Reports module for bizbooks
//!
//! Financial reports computed from a business's categories and transactions.

pub mod income_statement;

pub use income_statement::{
    build_income_statement, CategoryTotal, IncomeStatement, MonthlyBreakdown, PERIOD_SEPARATOR,
    UNCATEGORIZED,
};
