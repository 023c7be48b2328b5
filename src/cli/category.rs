//! Category CLI commands
//!
//! Implements CLI commands for listing, arranging and creating categories.

use clap::Subcommand;

use crate::display::category::{
    format_category_details, format_category_list, format_category_options, format_category_tree,
};
use crate::error::{BooksError, BooksResult};
use crate::models::CategoryKind;
use crate::services::{CategoryService, NewCategory};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories alphabetically
    List,

    /// Show categories as a parent/child tree
    Tree,

    /// Show the indented list used when choosing a parent
    Options,

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Kind: income, expense, asset, liability, equity, transfer or other
        #[arg(short, long)]
        kind: String,
        /// Parent category name or ID
        #[arg(short, long)]
        parent: Option<String>,
        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,
        /// Create the category as inactive
        #[arg(long)]
        inactive: bool,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> BooksResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Tree => {
            let tree = service.tree()?;
            print!("{}", format_category_tree(&tree));
        }

        CategoryCommands::Options => {
            let options = service.parent_options()?;
            print!("{}", format_category_options(&options));
        }

        CategoryCommands::Show { category } => {
            let found = service
                .find(&category)?
                .ok_or_else(|| BooksError::category_not_found(category.clone()))?;
            let parent = match found.parent_category_id {
                Some(parent_id) => service.get(parent_id)?,
                None => None,
            };
            print!("{}", format_category_details(&found, parent.as_ref()));
        }

        CategoryCommands::Create {
            name,
            kind,
            parent,
            description,
            inactive,
        } => {
            let kind: CategoryKind = kind
                .parse()
                .map_err(|e: crate::models::CategoryValidationError| {
                    BooksError::Validation(e.to_string())
                })?;

            let parent_category_id = match parent {
                Some(parent) => Some(
                    service
                        .find(&parent)?
                        .ok_or_else(|| BooksError::category_not_found(parent.clone()))?
                        .id,
                ),
                None => None,
            };

            let category = service.create(NewCategory {
                name,
                description,
                parent_category_id,
                kind,
                active: !inactive,
            })?;

            println!("Created category: {} ({})", category.name, category.id);
            println!("  Kind: {}", category.kind);
            if let Some(parent_id) = category.parent_category_id {
                println!("  Parent: {}", parent_id);
            }
        }
    }

    Ok(())
}
