//! Vendor display formatting

use crate::models::Vendor;

/// Format a table of vendors with their contact details
pub fn format_vendor_list(vendors: &[Vendor]) -> String {
    if vendors.is_empty() {
        return "No vendors found.\n\nRun 'bizbooks vendor create' to add one.\n".to_string();
    }

    let name_width = vendors
        .iter()
        .map(|v| v.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<width$}  {:<6}  {}\n",
        "ID",
        "Vendor",
        "Active",
        "Contact",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<8}  {:-<width$}  {:-<6}  {:-<8}\n",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for vendor in vendors {
        let contact: Vec<&str> = [&vendor.contact_name, &vendor.email, &vendor.phone]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .collect();
        let contact = if contact.is_empty() {
            "-".to_string()
        } else {
            contact.join(", ")
        };

        output.push_str(&format!(
            "{:<8}  {:<width$}  {:<6}  {}\n",
            vendor.id.to_string(),
            vendor.name,
            if vendor.active { "Yes" } else { "No" },
            contact,
            width = name_width
        ));
    }

    output
}
