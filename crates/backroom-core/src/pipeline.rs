//! Query pipeline — filter → sort → paginate over the record store.
//!
//! All three stages are pure: the input slice is never mutated, and the
//! pipeline is total over all valid inputs — no stage can fail or panic.
//!
//! The controller runs the stages separately so the filtered+sorted vector
//! can be cached: search and sort changes re-run [`apply_filters`], while
//! page and page-size changes only re-slice through [`paginate`].
//! [`compute_view`] composes both for one-shot use.

use crate::state::{SortDir, ViewState};
use crate::Product;

/// One computed page of the filtered view, plus the totals the rendering
/// layer needs for captions and control enablement.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub page_items: Vec<Product>,
    /// Number of records passing the filter (before slicing).
    pub total_count: usize,
    /// `max(1, ceil(total_count / page_size))` — never zero, even when empty.
    pub total_pages: usize,
    /// The page actually used after clamping into `[1, total_pages]`.
    pub page: usize,
}

/// Filter stage followed by sort stage.
///
/// Keeps records whose title, case-folded, contains the case-folded,
/// whitespace-trimmed search text; empty or whitespace-only search passes
/// everything. When a sort is set the result is reordered with a stable sort
/// on the declared field comparator (`Desc` reverses it, ties keep their
/// API-order position); otherwise API return order is preserved.
pub fn apply_filters(records: &[Product], state: &ViewState) -> Vec<Product> {
    let query = state.search.trim().to_lowercase();

    let mut data: Vec<Product> = if query.is_empty() {
        records.to_vec()
    } else {
        records
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&query))
            .cloned()
            .collect()
    };

    if let Some(spec) = state.sort {
        data.sort_by(|a, b| {
            let ord = spec.field.compare(a, b);
            match spec.dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            }
        });
    }

    data
}

/// Paginate stage: slice `filtered` down to the requested page.
///
/// The page is clamped down to `total_pages` (never up); after clamping a
/// beyond-range page cannot occur, so the slice bounds are always valid. The
/// last page may be short.
pub fn paginate(filtered: &[Product], page: usize, page_size: usize) -> ViewSnapshot {
    let page_size = page_size.max(1);
    let total_count = filtered.len();
    let total_pages = total_count.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_count);
    let page_items = if start < total_count {
        filtered[start..end].to_vec()
    } else {
        Vec::new()
    };

    ViewSnapshot { page_items, total_count, total_pages, page }
}

/// Full pipeline: `compute_view(records, state)` — the one-shot composition
/// of [`apply_filters`] and [`paginate`].
pub fn compute_view(records: &[Product], state: &ViewState) -> ViewSnapshot {
    let filtered = apply_filters(records, state);
    paginate(&filtered, state.page, state.page_size)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SortField, SortSpec};
    use crate::Category;

    fn product(id: u64, title: &str, price: f64) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            description: String::new(),
            category: Category { id: 1, name: "misc".to_string() },
            images: Vec::new(),
        }
    }

    fn corpus() -> Vec<Product> {
        vec![
            product(1, "Running shoe", 30.0),
            product(2, "Leather boot", 80.0),
            product(3, "Canvas SHOE", 25.0),
            product(4, "Wool sock", 5.0),
        ]
    }

    #[test]
    fn empty_search_passes_everything() {
        let state = ViewState::new(10);
        assert_eq!(apply_filters(&corpus(), &state).len(), 4);

        let mut padded = ViewState::new(10);
        padded.set_search("   ");
        assert_eq!(apply_filters(&corpus(), &padded).len(), 4);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let mut state = ViewState::new(10);
        state.set_search("ShOe");
        let out = apply_filters(&corpus(), &state);
        let ids: Vec<u64> = out.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn search_text_is_trimmed_before_matching() {
        let mut state = ViewState::new(10);
        state.set_search("  boot ");
        assert_eq!(apply_filters(&corpus(), &state).len(), 1);
    }

    #[test]
    fn sort_by_price_desc() {
        let mut state = ViewState::new(10);
        state.sort = Some(SortSpec { field: SortField::Price, dir: SortDir::Desc });
        let out = apply_filters(&corpus(), &state);
        let prices: Vec<f64> = out.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![80.0, 30.0, 25.0, 5.0]);
    }

    #[test]
    fn sort_by_title_is_case_insensitive() {
        let mut state = ViewState::new(10);
        state.sort = Some(SortSpec { field: SortField::Title, dir: SortDir::Asc });
        let out = apply_filters(&corpus(), &state);
        let titles: Vec<&str> = out.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Canvas SHOE", "Leather boot", "Running shoe", "Wool sock"]
        );
    }

    #[test]
    fn no_sort_preserves_api_order() {
        let state = ViewState::new(10);
        let out = apply_filters(&corpus(), &state);
        let ids: Vec<u64> = out.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let records = corpus();
        let mut state = ViewState::new(10);
        state.sort = Some(SortSpec { field: SortField::Price, dir: SortDir::Asc });
        let _ = apply_filters(&records, &state);
        assert_eq!(records[0].id, 1);
    }

    #[test]
    fn paginate_clamps_page_down() {
        let filtered = corpus();
        let snap = paginate(&filtered, 9, 3);
        assert_eq!(snap.total_pages, 2);
        assert_eq!(snap.page, 2);
        assert_eq!(snap.page_items.len(), 1);
        assert_eq!(snap.page_items[0].id, 4);
    }

    #[test]
    fn paginate_empty_set() {
        let snap = paginate(&[], 1, 10);
        assert_eq!(snap.total_count, 0);
        assert_eq!(snap.total_pages, 1);
        assert_eq!(snap.page, 1);
        assert!(snap.page_items.is_empty());
    }

    #[test]
    fn last_page_may_be_short() {
        let filtered = corpus();
        let snap = paginate(&filtered, 2, 3);
        assert_eq!(snap.page_items.len(), 1);
        assert_eq!(snap.total_count, 4);
    }
}
