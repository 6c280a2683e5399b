//! Render model — pure projection of a [`ViewSnapshot`] into the data the
//! display surface needs, decoupled from any terminal so it can be tested
//! headlessly.
//!
//! The TUI widgets consume a [`RenderModel`] verbatim: one row per page item,
//! the count and page captions, and the enablement flags for the previous /
//! next controls. A load failure replaces the rows with an error line.

use crate::pipeline::ViewSnapshot;
use crate::state::{SortDir, SortField, SortSpec, ViewState};

pub const COLUMNS: [&str; 5] = ["id", "title", "price", "category", "image"];

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RowModel {
    pub id: String,
    pub title: String,
    pub price: String,
    pub category: String,
    /// First image URL, empty when the record has none.
    pub thumb: String,
    /// Full description, surfaced for the selected-row preview line.
    pub description: String,
}

/// Everything the table surface renders for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub rows: Vec<RowModel>,
    pub count_caption: String,
    pub page_caption: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// Column headers with the active sort direction marker applied.
    pub headers: Vec<String>,
    /// Set when the last load failed; rendered in place of the rows.
    pub error: Option<String>,
}

impl RenderModel {
    /// Project a computed snapshot (plus the current sort, for header
    /// markers) into display data. `load_error` comes from the controller
    /// and wins over the rows.
    pub fn project(
        snapshot: &ViewSnapshot,
        state: &ViewState,
        load_error: Option<&str>,
    ) -> Self {
        let rows = snapshot
            .page_items
            .iter()
            .map(|p| RowModel {
                id: p.id.to_string(),
                title: p.title.clone(),
                price: format_price(p.price),
                category: p.category.name.clone(),
                thumb: p.thumbnail().unwrap_or("").to_string(),
                description: p.description.clone(),
            })
            .collect();

        Self {
            rows,
            count_caption: format!("Total {} products", snapshot.total_count),
            page_caption: format!("Page {} / {}", snapshot.page, snapshot.total_pages),
            prev_enabled: snapshot.page > 1,
            next_enabled: snapshot.page < snapshot.total_pages,
            headers: header_labels(state.sort),
            error: load_error.map(str::to_string),
        }
    }
}

fn header_labels(sort: Option<SortSpec>) -> Vec<String> {
    COLUMNS
        .iter()
        .map(|&name| {
            let marker = match sort {
                Some(SortSpec { field, dir }) if column_field(name) == Some(field) => {
                    match dir {
                        SortDir::Asc => " ▲",
                        SortDir::Desc => " ▼",
                    }
                }
                _ => "",
            };
            format!("{name}{marker}")
        })
        .collect()
}

fn column_field(name: &str) -> Option<SortField> {
    match name {
        "id" => Some(SortField::Id),
        "title" => Some(SortField::Title),
        "price" => Some(SortField::Price),
        "category" => Some(SortField::Category),
        _ => None,
    }
}

/// Format a price with thousands grouping: `1234567.5` → `"1,234,567.5"`.
///
/// Whole amounts print without decimals; fractional amounts keep up to two
/// places with a trailing zero trimmed.
pub fn format_price(value: f64) -> String {
    let cents_total = (value.abs() * 100.0).round() as u64;
    let whole = cents_total / 100;
    let cents = cents_total % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents_total > 0 { "-" } else { "" };
    if cents == 0 {
        format!("{sign}{grouped}")
    } else if cents % 10 == 0 {
        format!("{sign}{grouped}.{}", cents / 10)
    } else {
        format!("{sign}{grouped}.{cents:02}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
