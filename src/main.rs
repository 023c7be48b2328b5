use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bizbooks::cli::{
    handle_account_command, handle_category_command, handle_report_command,
    handle_transaction_command, handle_vendor_command,
};
use bizbooks::config::{paths::BooksPaths, settings::Settings};
use bizbooks::logging::init_tracing;
use bizbooks::models::BusinessId;
use bizbooks::storage::Storage;

#[derive(Parser)]
#[command(
    name = "bizbooks",
    version,
    about = "Category hierarchies and income statements for small-business bookkeeping",
    long_about = "bizbooks keeps per-business snapshots of accounts, vendors, \
                  categories and split transactions, shows categories as a parent/child tree and \
                  summarizes income and expenses by category and month."
)]
struct Cli {
    /// Log skipped records and storage activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Business to operate on
    #[arg(short, long, global = true, env = "BIZBOOKS_BUSINESS")]
    business: Option<BusinessId>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account commands
    #[command(subcommand, alias = "acc")]
    Account(bizbooks::cli::AccountCommands),

    /// Vendor commands
    #[command(subcommand)]
    Vendor(bizbooks::cli::VendorCommands),

    /// Category commands
    #[command(subcommand, alias = "cat")]
    Category(bizbooks::cli::CategoryCommands),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(bizbooks::cli::TransactionCommands),

    /// Report commands
    #[command(subcommand)]
    Report(bizbooks::cli::ReportCommands),

    /// Show current configuration and paths
    Config,
}

fn open_storage(paths: &BooksPaths, business: Option<BusinessId>) -> Result<Storage> {
    let business = business.context(
        "no business selected: pass --business <ID> or set BIZBOOKS_BUSINESS",
    )?;

    let storage = Storage::new(paths.clone(), business)?;
    storage.load_all()?;
    Ok(storage)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = BooksPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Account(cmd)) => {
            let storage = open_storage(&paths, cli.business)?;
            handle_account_command(&storage, cmd)?;
        }
        Some(Commands::Vendor(cmd)) => {
            let storage = open_storage(&paths, cli.business)?;
            handle_vendor_command(&storage, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            let storage = open_storage(&paths, cli.business)?;
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            let storage = open_storage(&paths, cli.business)?;
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let storage = open_storage(&paths, cli.business)?;
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("bizbooks Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            if let Some(business) = cli.business {
                println!("Business:        {}", business);
                println!(
                    "Business data:   {}",
                    paths.business_dir(business).display()
                );
            }
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
        }
        None => {
            println!("bizbooks - bookkeeping reports from the command line");
            println!();
            println!("Run 'bizbooks --help' for usage information.");
        }
    }

    Ok(())
}
