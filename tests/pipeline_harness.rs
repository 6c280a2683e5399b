//! Query pipeline integration harness.
//!
//! # What this covers
//!
//! - **Filter soundness / completeness**: every record in the filtered
//!   result contains the search text in its title case-insensitively, and
//!   every matching record is present; empty or whitespace-only search
//!   passes everything. Verified with proptest.
//! - **Sort monotonicity**: for any field/direction the result is monotonic
//!   under the declared comparator; ties keep their original relative order
//!   (the underlying sort is stable).
//! - **Pagination math**: `total_pages = max(1, ceil(total/page_size))`,
//!   slice length and page clamping, for both hand-picked and random inputs.
//! - **Page-reset rules**: search, sort, and page-size changes reset the
//!   page to 1; next/previous only move the slice.
//! - **Spec scenarios**: 25 records at page size 10, and a search matching
//!   3 of 25 titles.
//!
//! # What this does NOT cover
//!
//! - The sync controller's cache of the filtered view (see sync_harness)
//! - Render-model projection (see render_harness)
//!
//! # Running
//!
//! ```sh
//! cargo test --test pipeline_harness
//! ```

mod common;
use common::*;

use backroom::{
    apply_filters, compute_view, paginate, Product, SortDir, SortField, SortSpec, ViewState,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_title() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        "[A-Za-z ]{1,12}",
        Just("Running shoe".to_string()),
        Just("SHOE rack".to_string()),
    ]
}

fn arb_products() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec((0u64..500, arb_title(), 0.0f64..1000.0), 0..40).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (id, title, price))| {
                ProductBuilder::new(id, title)
                    .price(price)
                    .category((i % 3) as u64, format!("cat{}", i % 3))
                    .build()
            })
            .collect()
    })
}

fn arb_sort() -> impl Strategy<Value = SortSpec> {
    let field = prop_oneof![
        Just(SortField::Id),
        Just(SortField::Title),
        Just(SortField::Price),
        Just(SortField::Category),
    ];
    let dir = prop_oneof![Just(SortDir::Asc), Just(SortDir::Desc)];
    (field, dir).prop_map(|(field, dir)| SortSpec { field, dir })
}

// ---------------------------------------------------------------------------
// Filter stage
// ---------------------------------------------------------------------------

proptest! {
    /// Every record in the result matches; every matching record is in the
    /// result; empty/whitespace search passes everything.
    #[test]
    fn prop_filter_matches_exactly(records in arb_products(), query in "[ a-zA-Z]{0,5}") {
        let mut state = ViewState::new(10);
        state.set_search(query.clone());
        let out = apply_filters(&records, &state);

        let q = query.trim().to_lowercase();
        if q.is_empty() {
            prop_assert_eq!(out.len(), records.len());
        } else {
            for p in &out {
                prop_assert!(p.title.to_lowercase().contains(&q));
            }
            let expected = records
                .iter()
                .filter(|p| p.title.to_lowercase().contains(&q))
                .count();
            prop_assert_eq!(out.len(), expected);
        }
    }

    /// Filtering preserves the relative order of the records it keeps.
    #[test]
    fn prop_filter_preserves_order(records in arb_products(), query in "[a-z]{0,3}") {
        let mut state = ViewState::new(10);
        state.set_search(query);
        let out = apply_filters(&records, &state);

        let positions: Vec<usize> = out
            .iter()
            .map(|p| records.iter().position(|r| r == p).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        prop_assert_eq!(positions, sorted);
    }
}

// ---------------------------------------------------------------------------
// Sort stage
// ---------------------------------------------------------------------------

proptest! {
    /// For any adjacent pair in the sorted result, the declared field
    /// comparator holds under `Asc` and is reversed under `Desc`.
    #[test]
    fn prop_sort_is_monotonic(records in arb_products(), sort in arb_sort()) {
        let mut state = ViewState::new(10);
        state.sort = Some(sort);
        let out = apply_filters(&records, &state);

        for pair in out.windows(2) {
            let ord = sort.field.compare(&pair[0], &pair[1]);
            match sort.dir {
                SortDir::Asc => prop_assert_ne!(ord, std::cmp::Ordering::Greater),
                SortDir::Desc => prop_assert_ne!(ord, std::cmp::Ordering::Less),
            }
        }
    }

    /// Sorting never adds or drops records.
    #[test]
    fn prop_sort_is_a_permutation(records in arb_products(), sort in arb_sort()) {
        let mut state = ViewState::new(10);
        state.sort = Some(sort);
        let out = apply_filters(&records, &state);

        let mut expected = ids_of(&records);
        let mut actual = ids_of(&out);
        expected.sort_unstable();
        actual.sort_unstable();
        prop_assert_eq!(actual, expected);
    }
}

/// Records with equal sort keys keep their original relative order.
#[test]
fn sort_is_stable_on_ties() {
    let records = vec![
        ProductBuilder::new(1, "mug").price(5.0).build(),
        ProductBuilder::new(2, "mug").price(5.0).build(),
        ProductBuilder::new(3, "bowl").price(5.0).build(),
        ProductBuilder::new(4, "mug").price(5.0).build(),
    ];

    let mut state = ViewState::new(10);
    state.sort = Some(SortSpec { field: SortField::Price, dir: SortDir::Asc });
    assert_eq!(ids_of(&apply_filters(&records, &state)), vec![1, 2, 3, 4]);

    state.sort = Some(SortSpec { field: SortField::Title, dir: SortDir::Asc });
    assert_eq!(ids_of(&apply_filters(&records, &state)), vec![3, 1, 2, 4]);
}

// ---------------------------------------------------------------------------
// Paginate stage
// ---------------------------------------------------------------------------

#[rstest]
#[case(25, 10, 1, 10, 3, 1)]
#[case(25, 10, 3, 5, 3, 3)]
#[case(0, 10, 1, 0, 1, 1)]
#[case(10, 10, 1, 10, 1, 1)]
// Beyond-range page numbers clamp down, never up.
#[case(11, 5, 9, 1, 3, 3)]
#[case(5, 50, 4, 5, 1, 1)]
fn pagination_cases(
    #[case] total: u64,
    #[case] page_size: usize,
    #[case] page: usize,
    #[case] expect_len: usize,
    #[case] expect_pages: usize,
    #[case] expect_page: usize,
) {
    let records = numbered_products(total);
    let snap = paginate(&records, page, page_size);
    assert_eq!(snap.total_count, total as usize);
    assert_eq!(snap.total_pages, expect_pages);
    assert_eq!(snap.page, expect_page);
    assert_eq!(snap.page_items.len(), expect_len);
}

proptest! {
    /// `total_pages = max(1, ceil(total/page_size))`; the page used is
    /// `min(page, total_pages)`; the slice length is
    /// `min(page_size, total - (used-1)*page_size)` clamped to zero.
    #[test]
    fn prop_pagination_math(total in 0u64..200, page_size in 1usize..50, page in 1usize..30) {
        let records = numbered_products(total);
        let snap = paginate(&records, page, page_size);

        let total = total as usize;
        let expect_pages = total.div_ceil(page_size).max(1);
        let used = page.min(expect_pages);
        let expect_len = page_size.min(total.saturating_sub((used - 1) * page_size));

        prop_assert_eq!(snap.total_pages, expect_pages);
        prop_assert_eq!(snap.page, used);
        prop_assert_eq!(snap.page_items.len(), expect_len);
    }
}

// ---------------------------------------------------------------------------
// Page-reset rules
// ---------------------------------------------------------------------------

/// Search, sort, and page-size changes reset the page to 1; next/previous
/// only move the slice.
#[test]
fn state_changes_reset_page_where_required() {
    let records = numbered_products(25);
    let mut state = ViewState::new(10);

    state.next_page(3);
    state.next_page(3);
    assert_eq!(compute_view(&records, &state).page, 3);

    state.set_search("item");
    assert_eq!(compute_view(&records, &state).page, 1);

    state.next_page(3);
    state.toggle_sort(SortField::Price);
    assert_eq!(compute_view(&records, &state).page, 1);

    state.next_page(3);
    state.set_page_size(5);
    assert_eq!(compute_view(&records, &state).page, 1);
}

// ---------------------------------------------------------------------------
// Spec scenarios
// ---------------------------------------------------------------------------

/// 25 records, page size 10: page 1 shows records 1–10 and there are 3
/// pages; next twice then previous once lands on page 2 showing 11–20.
#[test]
fn scenario_25_records_three_pages() {
    let records = numbered_products(25);
    let mut state = ViewState::new(10);

    let snap = compute_view(&records, &state);
    assert_eq!(snap.total_pages, 3);
    assert_eq!(ids_of(&snap.page_items), (1..=10).collect::<Vec<_>>());

    state.next_page(snap.total_pages);
    state.next_page(snap.total_pages);
    state.prev_page();

    let snap = compute_view(&records, &state);
    assert_eq!(snap.page, 2);
    assert_eq!(ids_of(&snap.page_items), (11..=20).collect::<Vec<_>>());
}

/// Search text "shoe" matching 3 of 25 titles: filtered count 3, one page,
/// page reset to 1.
#[test]
fn scenario_search_shoe() {
    let records = shoe_catalog();
    let mut state = ViewState::new(10);
    state.next_page(3);
    state.set_search("shoe");

    let snap = compute_view(&records, &state);
    assert_eq!(snap.total_count, 3);
    assert_eq!(snap.total_pages, 1);
    assert_eq!(snap.page, 1);
    assert_eq!(ids_of(&snap.page_items), vec![3, 11, 24]);
}
