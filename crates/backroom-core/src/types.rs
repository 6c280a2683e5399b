//! Core types for backroom-core.
//!
//! This module defines the fundamental data structures shared across all
//! architectural layers: the [`Product`] record as returned by the catalog
//! API, its [`Category`] reference, and the [`ProductPayload`] write shape.

use serde::{Deserialize, Serialize};

/// One product record as returned by the catalog API.
///
/// The client holds a read replica of these: records are created and
/// destroyed entirely by the remote API, and the local copy is invalidated
/// and re-fetched wholesale after any mutation. Fields the API may omit
/// (`description`, `category`, `images`) fall back to their defaults rather
/// than failing deserialization; unknown fields (server timestamps, slugs)
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, assigned by the API.
    pub id: u64,
    pub title: String,
    /// Non-negative. The API serves plain JSON numbers.
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    /// Ordered image URLs, possibly empty. Reads may carry many; writes send
    /// exactly one (see [`ProductPayload::from_form`]).
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// First image URL, used as the table thumbnail column.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Category reference embedded in a [`Product`]: id plus display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

/// The editable fields of a product, as sent to the API on PUT and POST.
///
/// Serialized camelCase to match the wire shape
/// `{title, price, description, categoryId, images}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category_id: u64,
    pub images: Vec<String>,
}

impl ProductPayload {
    /// Build a payload from raw form input, applying the write-side coercion
    /// rules: title and description are whitespace-trimmed, price and
    /// category id parse-or-zero (invalid or empty input coerces to `0`, it
    /// is not an error), and the single image field is wrapped into a
    /// one-element list — an empty string when the field is blank.
    pub fn from_form(
        title: &str,
        price: &str,
        description: &str,
        category_id: &str,
        image: &str,
    ) -> Self {
        Self {
            title: title.trim().to_string(),
            price: price.trim().parse().unwrap_or(0.0),
            description: description.trim().to_string(),
            category_id: category_id.trim().parse().unwrap_or(0),
            images: vec![image.trim().to_string()],
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
