//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::products::Product;

/// One product entry in the shopping cart.
///
/// The name, price and image are snapshots taken when the line was created,
/// so later catalog changes never rewrite a cart in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Generated line identifier, stable across persistence round trips.
    pub id: Uuid,

    /// Identifier of the product this line was created from.
    pub product_id: String,

    /// Product name at add time.
    pub name: String,

    /// Unit price at add time.
    pub price: Decimal,

    /// Image reference at add time.
    pub image_url: String,

    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot a product into a new cart line.
    #[must_use]
    pub fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            quantity,
        }
    }

    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// How an upsert changed the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartUpdate {
    /// A new line was created for the product.
    Added {
        /// Product name for the confirmation notice.
        name: String,
    },

    /// An existing line for the product had its quantity increased.
    QuantityIncreased {
        /// Product name for the confirmation notice.
        name: String,

        /// Quantity on the line after the increase.
        quantity: u32,
    },
}

/// Shopping cart: an ordered collection of cart lines.
///
/// Invariant: at most one line per product identifier. [`Cart::upsert`] is
/// the only way lines enter the cart and it enforces this by incrementing
/// the existing line instead of inserting a duplicate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a product, merging into an existing line for
    /// the same product if there is one. Quantities saturate at `u32::MAX`
    /// rather than overflowing.
    pub fn upsert(&mut self, product: &Product, quantity: u32) -> CartUpdate {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity);

            return CartUpdate::QuantityIncreased {
                name: line.name.clone(),
                quantity: line.quantity,
            };
        }

        self.lines.push(CartLine::snapshot(product, quantity));

        CartUpdate::Added {
            name: product.name.clone(),
        }
    }

    /// Remove the line with the given identifier.
    ///
    /// Returns `false` if no such line exists; removing an absent line is a
    /// no-op, not an error.
    pub fn remove(&mut self, line_id: Uuid) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != line_id);

        self.lines.len() < before
    }

    /// Drop every line. Used by checkout after the order snapshot is taken.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of line totals across the cart.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total unit count across all lines, for the cart badge.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Get a line by identifier.
    #[must_use]
    pub fn line(&self, line_id: Uuid) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    /// Get the line holding the given product, if any.
    #[must_use]
    pub fn line_for_product(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
