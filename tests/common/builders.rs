//! Test builders — ergonomic constructors for `Product` fixtures.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use backroom::{Category, Product};

// ---------------------------------------------------------------------------
// ProductBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Product`] test fixtures.
///
/// # Example
///
/// ```rust
/// let product = ProductBuilder::new(7, "Running shoe")
///     .price(89.9)
///     .category(2, "Footwear")
///     .images(&["a.png", "b.png"])
///     .build();
/// ```
pub struct ProductBuilder {
    id: u64,
    title: String,
    price: f64,
    description: String,
    category: Category,
    images: Vec<String>,
}

impl ProductBuilder {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price: 10.0,
            description: String::new(),
            category: Category { id: 1, name: "misc".to_string() },
            images: Vec::new(),
        }
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, id: u64, name: impl Into<String>) -> Self {
        self.category = Category { id, name: name.into() };
        self
    }

    pub fn images(mut self, images: &[&str]) -> Self {
        self.images = images.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> Product {
        Product {
            id: self.id,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            images: self.images,
        }
    }
}

// ---------------------------------------------------------------------------
// Corpus helpers
// ---------------------------------------------------------------------------

/// Build `n` products with ids `1..=n`, titles `"item 1"…"item n"`, and
/// prices equal to their id — handy for paging and sorting assertions.
pub fn numbered_products(n: u64) -> Vec<Product> {
    (1..=n)
        .map(|i| ProductBuilder::new(i, format!("item {i}")).price(i as f64).build())
        .collect()
}

/// 25 products of which exactly three have "shoe" in the title (ids 3, 11,
/// 24 — mixed case to exercise case folding).
pub fn shoe_catalog() -> Vec<Product> {
    (1..=25u64)
        .map(|i| {
            let title = match i {
                3 => "Running shoe".to_string(),
                11 => "SHOE rack".to_string(),
                24 => "Horseshoe kit".to_string(),
                _ => format!("item {i}"),
            };
            ProductBuilder::new(i, title).price(i as f64).build()
        })
        .collect()
}
