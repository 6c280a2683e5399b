//! backroom — terminal admin table for a remote product catalog.
//!
//! Browse, filter, sort, paginate, edit, create, and export product records
//! fetched from a remote REST API. This crate re-exports the architectural
//! layers so integration tests (and downstream tooling) can import them from
//! one place.
//!
//! # Architecture
//!
//! ```text
//! API ──► RecordStore ──► Pipeline ──► RenderModel ──► TUI
//!              ▲              (ViewState)        │
//!        SyncController                          └──► CSV export
//! ```
//!
//! The UI drives the main thread; the three network round trips (load,
//! update, create) are the only background tasks, reporting back over a
//! channel pumped once per frame.

pub use backroom_api::{
    ApiError, CatalogApi, HttpCatalogClient, LoadOrigin, Notice, StatusLine, StatusPhase,
    SyncController, SyncEvent,
};
pub use backroom_core::{
    apply_filters, compute_view, config, export, paginate, Category, Product, ProductPayload,
    RecordStore, RenderModel, SortDir, SortField, SortSpec, ViewSnapshot, ViewState,
};
