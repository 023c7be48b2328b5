//! Category display formatting
//!
//! Formats categories for terminal output in tree, option and table views.

use crate::models::Category;
use crate::services::hierarchy::{CategoryNode, CategoryOption};

/// Format a category forest as a tree with box-drawing connectors
pub fn format_category_tree(forest: &[CategoryNode]) -> String {
    if forest.is_empty() {
        return "No categories found.\n\nRun 'bizbooks category create' to add one.\n"
            .to_string();
    }

    fn render(node: &CategoryNode, prefix: &str, is_last: bool, output: &mut String) {
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(&format!(
            "{}{}{}{}\n",
            prefix,
            connector,
            node.name(),
            node_suffix(&node.category)
        ));

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        for (i, child) in node.children.iter().enumerate() {
            render(child, &child_prefix, i == node.children.len() - 1, output);
        }
    }

    let mut output = String::new();
    for root in forest {
        output.push_str(&format!("{}{}\n", root.name(), node_suffix(&root.category)));
        for (i, child) in root.children.iter().enumerate() {
            render(child, "", i == root.children.len() - 1, &mut output);
        }
    }

    output
}

fn node_suffix(category: &Category) -> String {
    let inactive = if category.active { "" } else { ", inactive" };
    format!(" ({}{})", category.kind, inactive)
}

/// Format the parent-selection options, one indented label per line
pub fn format_category_options(options: &[CategoryOption]) -> String {
    if options.is_empty() {
        return "No categories found.\n".to_string();
    }

    let id_width = options
        .iter()
        .map(|o| o.id.to_string().len())
        .max()
        .unwrap_or(2);

    options
        .iter()
        .map(|o| format!("{:>width$}  {}\n", o.id.to_string(), o.label, width = id_width))
        .collect()
}

/// Format a simple table of categories
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<width$}  {:<10}  {:<8}  {}\n",
        "ID",
        "Category",
        "Kind",
        "Active",
        "Parent",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<8}  {:-<width$}  {:-<10}  {:-<8}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for category in categories {
        let parent = category
            .parent_category_id
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&format!(
            "{:<8}  {:<width$}  {:<10}  {:<8}  {}\n",
            category.id.to_string(),
            category.name,
            category.kind.label(),
            if category.active { "Yes" } else { "No" },
            parent,
            width = name_width
        ));
    }

    output
}

/// Format category details
pub fn format_category_details(category: &Category, parent: Option<&Category>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:          {}\n", category.id));
    output.push_str(&format!("  Kind:        {}\n", category.kind));
    output.push_str(&format!(
        "  Active:      {}\n",
        if category.active { "Yes" } else { "No" }
    ));

    match (category.parent_category_id, parent) {
        (Some(_), Some(p)) => output.push_str(&format!("  Parent:      {} ({})\n", p.name, p.id)),
        (Some(id), None) => output.push_str(&format!("  Parent:      {} (missing)\n", id)),
        (None, _) => output.push_str("  Parent:      (none)\n"),
    }

    if let Some(description) = &category.description {
        output.push_str(&format!("  Description: {}\n", description));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryKind;
    use crate::services::hierarchy::{build_options, build_tree};

    fn sample() -> Vec<Category> {
        vec![
            Category::new(1, "Expenses", CategoryKind::Expense),
            Category::new(2, "Rent", CategoryKind::Expense).with_parent(1),
            Category::new(3, "Office", CategoryKind::Expense).with_parent(1),
            Category::new(4, "Paper", CategoryKind::Expense).with_parent(3),
            Category::new(5, "Sales", CategoryKind::Income),
        ]
    }

    #[test]
    fn test_format_empty_tree() {
        let output = format_category_tree(&[]);
        assert!(output.contains("No categories found"));
    }

    #[test]
    fn test_format_category_tree() {
        let output = format_category_tree(&build_tree(&sample()));
        let expected = "\
Expenses (Expense)
├── Office (Expense)
│   └── Paper (Expense)
└── Rent (Expense)
Sales (Income)
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_format_options() {
        let output = format_category_options(&build_options(&build_tree(&sample())));
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "cat-1  Expenses");
        assert_eq!(lines[2], "cat-4  — — Paper");
    }

    #[test]
    fn test_format_list_and_details() {
        let mut categories = sample();
        categories[1].active = false;

        let list = format_category_list(&categories);
        assert!(list.contains("Rent"));
        assert!(list.contains("No"));

        let details = format_category_details(&categories[1], Some(&categories[0]));
        assert!(details.contains("Parent:      Expenses (cat-1)"));
        assert!(details.contains("Active:      No"));
    }
}
