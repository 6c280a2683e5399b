//! View state — the query parameters that drive the displayed subset.
//!
//! [`ViewState`] holds the search text, sort specification, page number and
//! page size. It is owned exclusively by the sync controller and mutated only
//! through the methods here, which enforce the page-reset rules: any change
//! to search, sort, or page size resets the page to 1; next/previous touch
//! only the page number.
//!
//! Sorting uses a declared per-field comparator ([`SortField::compare`])
//! rather than inspecting value types at runtime, so mixed or missing values
//! cannot produce an ambiguous order.

use std::cmp::Ordering;

use crate::Product;

/// Sortable table column. Each field carries a fixed comparator kind:
/// `Id` and `Price` compare numerically, `Title` and `Category` textually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Price,
    Category,
}

impl SortField {
    /// Compare two records on this field in ascending order.
    ///
    /// Textual fields compare case-insensitively, falling back to a
    /// case-sensitive comparison so equal-ignoring-case titles still order
    /// deterministically. `Price` uses `total_cmp`, which is total over all
    /// `f64` values.
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Title => cmp_text(&a.title, &b.title),
            SortField::Category => cmp_text(&a.category.name, &b.category.name),
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortField::Id => write!(f, "id"),
            SortField::Title => write!(f, "title"),
            SortField::Price => write!(f, "price"),
            SortField::Category => write!(f, "category"),
        }
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// A sort field plus direction. `ViewState::sort == None` means the API's
/// original return order is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub dir: SortDir,
}

/// The current query parameters: search text, sort, page, page size.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Case-insensitive substring match against the product title.
    pub search: String,
    pub sort: Option<SortSpec>,
    /// 1-based. The pipeline clamps the page it actually uses into
    /// `[1, total_pages]`; the stored value never exceeds what the last
    /// snapshot reported.
    pub page: usize,
    pub page_size: usize,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replace the search text and reset to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Select `field` for sorting, or flip the direction when it is already
    /// the active sort field. Resets to page 1.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort = match self.sort {
            Some(SortSpec { field: f, dir: SortDir::Asc }) if f == field => {
                Some(SortSpec { field, dir: SortDir::Desc })
            }
            Some(SortSpec { field: f, dir: SortDir::Desc }) if f == field => {
                Some(SortSpec { field, dir: SortDir::Asc })
            }
            _ => Some(SortSpec { field, dir: SortDir::Asc }),
        };
        self.page = 1;
    }

    /// Drop the sort, restoring API return order. Resets to page 1.
    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.page = 1;
    }

    /// Change the page size and reset to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Advance one page, bounded by `total_pages`. Filter and sort results
    /// are untouched; only the slice moves.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    /// Go back one page, bounded below by 1.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
