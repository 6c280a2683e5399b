//! Export — CSV encoder for the currently visible page.
//!
//! Scope is the visible page only, not the full filtered set or the whole
//! store; that is the documented contract, not an accident. The caller is
//! responsible for writing the returned string to the export file.

use crate::Product;

/// Default export file name, offered in the working directory.
pub const EXPORT_FILE_NAME: &str = "products.csv";

const HEADER: &str = "id,title,price,category,images";

/// Encode one page of products as CSV: the fixed header row followed by one
/// row per record, newline-joined. The `images` column joins all image URLs
/// with `" | "` into a single cell.
pub fn encode_csv(page_items: &[Product]) -> String {
    let mut out = String::from(HEADER);
    for p in page_items {
        out.push('\n');
        let cells = [
            p.id.to_string(),
            escape_csv(&p.title),
            p.price.to_string(),
            escape_csv(&p.category.name),
            escape_csv(&p.images.join(" | ")),
        ];
        out.push_str(&cells.join(","));
    }
    out
}

/// Standard tabular escaping: a value containing a comma, double quote, or
/// newline is wrapped in double quotes with internal quotes doubled. Clean
/// values pass through unchanged.
fn escape_csv(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
