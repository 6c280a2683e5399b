//! backroom-api — catalog API client and sync controller.
//!
//! The [`CatalogApi`] trait abstracts the remote product API's three round
//! trips; [`HttpCatalogClient`] is the reqwest-backed production
//! implementation. [`SyncController`] owns the record store and view state,
//! spawns each round trip as a background task, and applies the results on
//! the UI thread via its event pump.

pub mod client;
pub mod controller;
pub mod error;

pub use client::{CatalogApi, HttpCatalogClient};
pub use controller::{LoadOrigin, Notice, StatusLine, StatusPhase, SyncController, SyncEvent};
pub use error::ApiError;
