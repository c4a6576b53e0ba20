//! Wishlist

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::products::Product;

/// One saved-for-later product reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistLine {
    /// Generated line identifier.
    pub id: Uuid,

    /// Identifier of the saved product.
    pub product_id: String,

    /// Product name at save time.
    pub name: String,

    /// Unit price at save time.
    pub price: Decimal,

    /// Image reference at save time.
    pub image_url: String,
}

impl WishlistLine {
    /// Snapshot a product into a new wishlist line.
    #[must_use]
    pub fn snapshot(product: &Product) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
        }
    }
}

/// Saved-items collection.
///
/// Invariant: at most one line per product identifier; [`Wishlist::add`]
/// refuses duplicates instead of inserting them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    lines: Vec<WishlistLine>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a product. Returns `false` if it was already saved, in which
    /// case the wishlist is unchanged.
    pub fn add(&mut self, product: &Product) -> bool {
        if self.contains_product(&product.id) {
            return false;
        }

        self.lines.push(WishlistLine::snapshot(product));

        true
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

    /// Check whether a product is already saved.
    #[must_use]
    pub fn contains_product(&self, product_id: &str) -> bool {
        self.lines.iter().any(|line| line.product_id == product_id)
    }

    /// Get a line by identifier.
    #[must_use]
    pub fn line(&self, line_id: Uuid) -> Option<&WishlistLine> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &WishlistLine> {
        self.lines.iter()
    }

    /// Get the number of saved items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::catalog::Catalog;

    use super::*;

    #[test]
    fn add_twice_keeps_one_line() -> TestResult {
        let catalog = Catalog::seeded()?;
        let product = catalog.find_by_id("3").ok_or("missing product")?;
        let mut wishlist = Wishlist::new();

        assert!(wishlist.add(product));
        assert!(!wishlist.add(product));
        assert_eq!(wishlist.len(), 1);

        Ok(())
    }

    #[test]
    fn remove_is_idempotent() -> TestResult {
        let catalog = Catalog::seeded()?;
        let mut wishlist = Wishlist::new();

        wishlist.add(catalog.find_by_id("3").ok_or("missing product")?);
        let line_id = wishlist.iter().next().ok_or("missing line")?.id;

        assert!(wishlist.remove(line_id));
        assert!(!wishlist.remove(line_id));
        assert!(wishlist.is_empty());

        Ok(())
    }

    #[test]
    fn snapshot_copies_product_fields() -> TestResult {
        let catalog = Catalog::seeded()?;
        let product = catalog.find_by_id("6").ok_or("missing product")?;

        let line = WishlistLine::snapshot(product);

        assert_eq!(line.product_id, product.id);
        assert_eq!(line.name, product.name);
        assert_eq!(line.price, product.price);

        Ok(())
    }
}
