//! Shared test support: builders, assertions, and the fake catalog API
//! server.
//!
//! Each harness pulls in what it needs via `mod common; use common::*;`.

#![allow(unused)]

pub mod assertions;
pub mod builders;
pub mod fake_catalog_api;

pub use assertions::*;
pub use builders::*;
pub use fake_catalog_api::FakeCatalogApi;
