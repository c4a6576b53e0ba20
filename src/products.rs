//! Products

use rust_decimal::Decimal;
use serde::Deserialize;

/// A catalog product.
///
/// Products are seeded once at startup and never mutated; cart and wishlist
/// lines carry their own name/price snapshots rather than referencing back
/// into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    /// Unique product identifier, opaque to the engine.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Category name used by category views.
    pub category: String,

    /// Unit price in the shop currency.
    pub price: Decimal,

    /// Average review rating.
    pub rating: Decimal,

    /// Short marketing description.
    pub description: String,

    /// Free-text technical specifications.
    pub specs: String,

    /// Image reference for the product card.
    pub image_url: String,
}
