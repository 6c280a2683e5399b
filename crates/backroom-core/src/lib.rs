//! backroom-core — data layer for the backroom catalog admin.
//!
//! This crate exposes the pure, synchronous layers of the application: the
//! record types, the in-memory store, the view state, the query pipeline,
//! the render projection, and the CSV export encoder.
//!
//! # Architecture
//!
//! ```text
//! API ──► RecordStore ──► Pipeline ──► RenderModel ──► UI
//!                (parameterized by ViewState)    │
//!                                                └──► Export
//! ```
//!
//! Everything here is total and free of I/O; the async API client and the
//! sync controller live in `backroom-api`, the terminal shell in
//! `backroom-tui`.

pub mod config;
pub mod export;
pub mod pipeline;
pub mod render;
pub mod state;
pub mod store;
pub mod types;

pub use pipeline::{apply_filters, compute_view, paginate, ViewSnapshot};
pub use render::RenderModel;
pub use state::{SortDir, SortField, SortSpec, ViewState};
pub use store::RecordStore;
pub use types::{Category, Product, ProductPayload};
