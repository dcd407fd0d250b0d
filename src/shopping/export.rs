//! CSV rendering of the shopping list and its inline download link.

use crate::shopping::list::ShoppingItem;

/// CSV header row.
pub const CSV_HEADER: &str = "Item,Quantity,Unit";

/// File name suggested to the user.
pub const CSV_FILE_NAME: &str = "shopping-list.csv";

/// Render the list as CSV.
///
/// Double quotes in free text become single quotes so no field needs escaping.
#[must_use]
pub fn to_csv(items: &[ShoppingItem]) -> String {
    let rows: Vec<String> = items
        .iter()
        .map(|i| format!("{},{},{}", sanitize(&i.item), i.quantity, sanitize(&i.unit)))
        .collect();
    format!("{CSV_HEADER}\n{}", rows.join("\n"))
}

/// Wrap CSV content in a percent-encoded `data:` URI.
#[must_use]
pub fn data_uri(csv: &str) -> String {
    format!("data:text/csv;charset=utf-8,{}", urlencoding::encode(csv))
}

/// Message block telling the user how to download `csv`.
#[must_use]
pub fn download_link(csv: &str, file_name: &str) -> String {
    format!(
        "**Download Link:** Copy and paste this URL into your browser address bar to download {file_name}:\n\n`{}`\n\nOr right-click and \"Save As\" to download the file directly.",
        data_uri(csv)
    )
}

fn sanitize(text: &str) -> String {
    text.replace('"', "'")
}
