//! Account display formatting

use crate::models::Account;

/// Format a table of accounts
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n\nRun 'bizbooks account create' to add one.\n".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<width$}  {}\n",
        "ID",
        "Account",
        "Type",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<8}  {:-<width$}  {:-<8}\n",
        "",
        "",
        "",
        width = name_width
    ));

    for account in accounts {
        output.push_str(&format!(
            "{:<8}  {:<width$}  {}\n",
            account.id.to_string(),
            account.name,
            account.account_type.as_deref().unwrap_or("-"),
            width = name_width
        ));
    }

    output
}
