//! Assertion helpers shared across harnesses.

use backroom::Product;

/// Project a product slice down to its ids, in order.
pub fn ids_of(products: &[Product]) -> Vec<u64> {
    products.iter().map(|p| p.id).collect()
}

/// Project a product slice down to its titles, in order.
pub fn titles_of(products: &[Product]) -> Vec<String> {
    products.iter().map(|p| p.title.clone()).collect()
}
