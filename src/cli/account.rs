//! Account CLI commands
//!
//! Implements CLI commands for listing and creating accounts.

use clap::Subcommand;

use crate::display::account::format_account_list;
use crate::error::BooksResult;
use crate::services::AccountService;
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// List all accounts
    List,

    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (e.g. "Checking", "Credit Card")
        #[arg(short = 't', long)]
        account_type: Option<String>,
    },
}

/// Handle an account command
pub fn handle_account_command(storage: &Storage, cmd: AccountCommands) -> BooksResult<()> {
    let service = AccountService::new(storage);

    match cmd {
        AccountCommands::List => {
            let accounts = service.list()?;
            print!("{}", format_account_list(&accounts));
        }

        AccountCommands::Create { name, account_type } => {
            let account = service.create(&name, account_type.as_deref())?;

            println!("Created account: {} ({})", account.name, account.id);
            if let Some(account_type) = &account.account_type {
                println!("  Type: {}", account_type);
            }
        }
    }

    Ok(())
}
