//! Vendor CLI commands
//!
//! Implements CLI commands for listing and creating vendors.

use clap::Subcommand;

use crate::display::vendor::format_vendor_list;
use crate::error::BooksResult;
use crate::services::{NewVendor, VendorService};
use crate::storage::Storage;

/// Vendor subcommands
#[derive(Subcommand)]
pub enum VendorCommands {
    /// List all vendors
    List,

    /// Create a new vendor
    Create {
        /// Vendor name
        name: String,
        /// Contact person
        #[arg(short, long)]
        contact: Option<String>,
        /// Contact email
        #[arg(short, long)]
        email: Option<String>,
        /// Contact phone
        #[arg(short, long)]
        phone: Option<String>,
        /// Create the vendor as inactive
        #[arg(long)]
        inactive: bool,
    },
}

/// Handle a vendor command
pub fn handle_vendor_command(storage: &Storage, cmd: VendorCommands) -> BooksResult<()> {
    let service = VendorService::new(storage);

    match cmd {
        VendorCommands::List => {
            let vendors = service.list()?;
            print!("{}", format_vendor_list(&vendors));
        }

        VendorCommands::Create {
            name,
            contact,
            email,
            phone,
            inactive,
        } => {
            let vendor = service.create(NewVendor {
                name,
                contact_name: contact,
                email,
                phone,
                active: !inactive,
            })?;

            println!("Created vendor: {} ({})", vendor.name, vendor.id);
        }
    }

    Ok(())
}
