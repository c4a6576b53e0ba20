//! Commerce
//!
//! The state machine that owns the cart, wishlist and order history. Every
//! mutation enforces its invariants in memory first and then writes the
//! touched collections through the [`StateStore`], so a restart always
//! reloads what the last successful operation left behind.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    cart::{Cart, CartUpdate},
    catalog::Catalog,
    notices::Notice,
    orders::{Order, OrderHistory},
    store::{KeyValueStore, StateStore, StoreError},
    wishlist::Wishlist,
};

/// Commerce operation errors. Every variant is a refused request: the
/// collections are left exactly as they were.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// The product identifier does not resolve in the catalog.
    #[error("product {0} not found")]
    ProductNotFound(String),

    /// A quantity of zero was requested.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// Checkout was requested with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The wishlist entry to move does not exist.
    #[error("wishlist entry {0} not found")]
    WishlistEntryNotFound(Uuid),

    /// The durable mirror could not be written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CommerceError {
    /// The user-facing notice for this refusal, in toast wording.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::ProductNotFound(_) => Notice::error("Product not found."),
            Self::EmptyCart => Notice::error("Cart is empty!"),
            Self::InvalidQuantity => Notice::error("Quantity must be at least 1."),
            Self::WishlistEntryNotFound(_) => Notice::error("Saved item not found."),
            Self::Store(_) => Notice::error("Could not save your changes."),
        }
    }
}

/// Tunable behavior of the state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommerceConfig {
    /// Flat shipping charge added to every order regardless of contents.
    pub flat_shipping: Decimal,

    /// Whether moving a wishlist entry to the cart also removes the entry.
    ///
    /// By default the entry is kept: a saved favorite survives being bought
    /// once. Set this to drop it on move instead.
    pub move_to_cart_removes_entry: bool,
}

impl Default for CommerceConfig {
    fn default() -> Self {
        Self {
            flat_shipping: Decimal::new(15_00, 2),
            move_to_cart_removes_entry: false,
        }
    }
}

/// Outcome of a wishlist save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistUpdate {
    /// The product was added to the wishlist.
    Saved,

    /// The product was already saved; nothing changed.
    AlreadySaved,
}

impl WishlistUpdate {
    /// The user-facing notice for this outcome.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Saved => Notice::success("Added to Wishlist!"),
            Self::AlreadySaved => Notice::info("Already in Wishlist."),
        }
    }
}

/// Outcome of a cart removal. Removing an absent line is a no-op, and the
/// toast does not distinguish the two cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartRemoval {
    /// The line existed and was removed.
    Removed,

    /// No such line; nothing changed.
    NotPresent,
}

impl CartRemoval {
    /// Whether a line was actually removed.
    #[must_use]
    pub fn was_removed(&self) -> bool {
        matches!(self, Self::Removed)
    }

    /// The user-facing notice for this outcome.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Removed | Self::NotPresent => Notice::info("Item removed."),
        }
    }
}

/// Outcome of a wishlist removal. Removing an absent line is a no-op, and
/// the toast does not distinguish the two cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistRemoval {
    /// The line existed and was removed.
    Removed,

    /// No such line; nothing changed.
    NotPresent,
}

impl WishlistRemoval {
    /// Whether a line was actually removed.
    #[must_use]
    pub fn was_removed(&self) -> bool {
        matches!(self, Self::Removed)
    }

    /// The user-facing notice for this outcome.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Removed | Self::NotPresent => Notice::info("Removed from Wishlist."),
        }
    }
}

impl CartUpdate {
    /// The user-facing notice for this outcome.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Added { name } => Notice::success(format!("{name} added to cart!")),
            Self::QuantityIncreased { name, .. } => {
                Notice::success(format!("{name} quantity updated!"))
            }
        }
    }
}

/// A successful checkout, carrying what the confirmation view needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// Identifier of the recorded order.
    pub id: String,

    /// Amount charged.
    pub total: Decimal,
}

impl PlacedOrder {
    /// The user-facing notice for this outcome.
    #[must_use]
    pub fn notice(&self) -> Notice {
        Notice::success(format!("Order {} placed successfully!", self.id))
    }
}

/// The commerce state machine.
///
/// Exclusively owns the cart, wishlist and order collections in memory and
/// treats the store as a mirror: read once at startup, written after every
/// mutation. `&mut self` on every mutation keeps each operation atomic from
/// the caller's perspective; a concurrent embedding must serialize access
/// per user (one `Commerce` per session, never shared).
#[derive(Debug)]
pub struct Commerce<S> {
    catalog: Catalog,
    cart: Cart,
    wishlist: Wishlist,
    orders: OrderHistory,
    store: StateStore<S>,
    config: CommerceConfig,
}

impl<S: KeyValueStore> Commerce<S> {
    /// Load persisted collections from `store` and take ownership of them.
    ///
    /// # Errors
    ///
    /// Returns a [`CommerceError`] if the storage backend fails; corrupt
    /// persisted data is discarded and replaced with empty collections.
    pub fn open(
        catalog: Catalog,
        store: S,
        config: CommerceConfig,
    ) -> Result<Self, CommerceError> {
        Self::open_with_store(catalog, StateStore::new(store), config)
    }

    /// Like [`Commerce::open`], for a backend already wrapped in a
    /// [`StateStore`].
    ///
    /// # Errors
    ///
    /// Returns a [`CommerceError`] if the storage backend fails.
    pub fn open_with_store(
        catalog: Catalog,
        mut store: StateStore<S>,
        config: CommerceConfig,
    ) -> Result<Self, CommerceError> {
        let state = store.load()?;

        debug!(
            cart_lines = state.cart.len(),
            wishlist_lines = state.wishlist.len(),
            orders = state.orders.len(),
            "loaded persisted collections"
        );

        Ok(Self {
            catalog,
            cart: state.cart,
            wishlist: state.wishlist,
            orders: state.orders,
            store,
            config,
        })
    }

    /// Add `quantity` units of a product to the cart, merging into the
    /// existing line if the product is already there.
    ///
    /// # Errors
    ///
    /// Returns a [`CommerceError`] if the product is unknown, the quantity
    /// is zero, or the cart entry cannot be written.
    #[tracing::instrument(skip(self))]
    pub fn add_to_cart(
        &mut self,
        product_id: &str,
        quantity: u32,
    ) -> Result<CartUpdate, CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::InvalidQuantity);
        }

        let product = self
            .catalog
            .find_by_id(product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_owned()))?;

        let update = self.cart.upsert(product, quantity);
        self.store.save_cart(&self.cart)?;

        debug!(lines = self.cart.len(), units = self.cart.unit_count(), "cart updated");

        Ok(update)
    }

    /// Remove a cart line. Removing an absent line is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`CommerceError`] if the cart entry cannot be written.
    #[tracing::instrument(skip(self))]
    pub fn remove_from_cart(&mut self, line_id: Uuid) -> Result<CartRemoval, CommerceError> {
        let removal = if self.cart.remove(line_id) {
            CartRemoval::Removed
        } else {
            CartRemoval::NotPresent
        };
        self.store.save_cart(&self.cart)?;

        Ok(removal)
    }

    /// Save a product to the wishlist. Saving an already-saved product is a
    /// no-op reported as [`WishlistUpdate::AlreadySaved`].
    ///
    /// # Errors
    ///
    /// Returns a [`CommerceError`] if the product is unknown or the
    /// wishlist entry cannot be written.
    #[tracing::instrument(skip(self))]
    pub fn add_to_wishlist(&mut self, product_id: &str) -> Result<WishlistUpdate, CommerceError> {
        let product = self
            .catalog
            .find_by_id(product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_owned()))?;

        if !self.wishlist.add(product) {
            return Ok(WishlistUpdate::AlreadySaved);
        }

        self.store.save_wishlist(&self.wishlist)?;

        Ok(WishlistUpdate::Saved)
    }

    /// Remove a wishlist line. Removing an absent line is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`CommerceError`] if the wishlist entry cannot be written.
    #[tracing::instrument(skip(self))]
    pub fn remove_from_wishlist(
        &mut self,
        line_id: Uuid,
    ) -> Result<WishlistRemoval, CommerceError> {
        let removal = if self.wishlist.remove(line_id) {
            WishlistRemoval::Removed
        } else {
            WishlistRemoval::NotPresent
        };
        self.store.save_wishlist(&self.wishlist)?;

        Ok(removal)
    }

    /// Move a saved item into the cart.
    ///
    /// Whether the wishlist entry survives the move is controlled by
    /// [`CommerceConfig::move_to_cart_removes_entry`]; the default keeps it.
    ///
    /// # Errors
    ///
    /// Returns a [`CommerceError`] if the entry does not exist, its product
    /// is no longer in the catalog, or persistence fails.
    #[tracing::instrument(skip(self))]
    pub fn move_to_cart(
        &mut self,
        line_id: Uuid,
        quantity: u32,
    ) -> Result<CartUpdate, CommerceError> {
        let product_id = self
            .wishlist
            .line(line_id)
            .map(|line| line.product_id.clone())
            .ok_or(CommerceError::WishlistEntryNotFound(line_id))?;

        let update = self.add_to_cart(&product_id, quantity)?;

        if self.config.move_to_cart_removes_entry {
            self.wishlist.remove(line_id);
            self.store.save_wishlist(&self.wishlist)?;
        }

        Ok(update)
    }

    /// Convert the current cart into a recorded order and empty the cart.
    ///
    /// The order totals the cart's subtotal plus the flat shipping charge,
    /// snapshots the lines, is recorded most-recent-first, and both the
    /// order history and the now-empty cart are persisted before returning.
    /// No intermediate state is observable through any other operation.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::EmptyCart`] if there is nothing to check
    /// out, or a persistence error; in the former case nothing changes.
    #[tracing::instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<PlacedOrder, CommerceError> {
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let subtotal = self.cart.subtotal();
        let lines = self.cart.iter().cloned().collect();
        let order = Order::place(lines, subtotal, self.config.flat_shipping, Timestamp::now());

        let placed = PlacedOrder {
            id: order.id.clone(),
            total: order.total,
        };

        info!(order_id = %placed.id, total = %placed.total, "order placed");

        self.orders.record(order);
        self.cart.clear();

        self.store.save_orders(&self.orders)?;
        self.store.save_cart(&self.cart)?;

        Ok(placed)
    }

    /// The read-only catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The current wishlist.
    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// The order history, most recent first.
    pub fn orders(&self) -> &OrderHistory {
        &self.orders
    }

    /// Look up a recorded order.
    #[must_use]
    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.find(order_id)
    }

    /// The active configuration.
    pub fn config(&self) -> &CommerceConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::store::{MemoryStore, MockKeyValueStore, keys};

    use super::*;

    fn commerce() -> Result<Commerce<MemoryStore>, Box<dyn std::error::Error>> {
        Ok(Commerce::open(
            Catalog::seeded()?,
            MemoryStore::new(),
            CommerceConfig::default(),
        )?)
    }

    #[test]
    fn add_to_cart_twice_merges_quantity() -> TestResult {
        let mut commerce = commerce()?;

        commerce.add_to_cart("2", 1)?;
        let update = commerce.add_to_cart("2", 1)?;

        assert!(matches!(
            update,
            CartUpdate::QuantityIncreased { quantity: 2, .. }
        ));
        assert_eq!(commerce.cart().len(), 1);

        Ok(())
    }

    #[test]
    fn add_to_cart_unknown_product_changes_nothing() -> TestResult {
        let mut commerce = commerce()?;

        let result = commerce.add_to_cart("999", 1);

        assert!(matches!(result, Err(CommerceError::ProductNotFound(_))));
        assert!(commerce.cart().is_empty());

        Ok(())
    }

    #[test]
    fn add_to_cart_rejects_zero_quantity() -> TestResult {
        let mut commerce = commerce()?;

        let result = commerce.add_to_cart("1", 0);

        assert!(matches!(result, Err(CommerceError::InvalidQuantity)));
        assert!(commerce.cart().is_empty());

        Ok(())
    }

    #[test]
    fn checkout_empty_cart_is_refused() -> TestResult {
        let mut commerce = commerce()?;

        let result = commerce.checkout();

        assert!(matches!(result, Err(CommerceError::EmptyCart)));
        assert!(commerce.orders().is_empty());

        Ok(())
    }

    #[test]
    fn checkout_totals_clears_and_prepends() -> TestResult {
        let mut commerce = commerce()?;

        // 2 x 149.99 = 299.98, + 15.00 shipping = 314.98
        commerce.add_to_cart("2", 2)?;
        let placed = commerce.checkout()?;

        assert_eq!(placed.total, Decimal::new(314_98, 2));
        assert!(commerce.cart().is_empty());
        assert_eq!(
            commerce.orders().latest().map(|o| o.id.as_str()),
            Some(placed.id.as_str())
        );

        Ok(())
    }

    #[test]
    fn consecutive_checkouts_get_distinct_ids() -> TestResult {
        let mut commerce = commerce()?;

        commerce.add_to_cart("5", 1)?;
        let first = commerce.checkout()?;

        commerce.add_to_cart("5", 1)?;
        let second = commerce.checkout()?;

        assert_ne!(first.id, second.id);
        assert_eq!(commerce.orders().len(), 2);
        assert_eq!(
            commerce.orders().latest().map(|o| o.id.as_str()),
            Some(second.id.as_str())
        );

        Ok(())
    }

    #[test]
    fn order_lines_survive_later_cart_mutation() -> TestResult {
        let mut commerce = commerce()?;

        commerce.add_to_cart("3", 1)?;
        let placed = commerce.checkout()?;
        commerce.add_to_cart("4", 5)?;

        let order = commerce.order(&placed.id).ok_or("missing order")?;
        assert_eq!(order.lines.len(), 1);
        assert_eq!(
            order.lines.first().map(|line| line.product_id.as_str()),
            Some("3")
        );

        Ok(())
    }

    #[test]
    fn wishlist_save_is_unique_per_product() -> TestResult {
        let mut commerce = commerce()?;

        assert_eq!(commerce.add_to_wishlist("6")?, WishlistUpdate::Saved);
        assert_eq!(commerce.add_to_wishlist("6")?, WishlistUpdate::AlreadySaved);
        assert_eq!(commerce.wishlist().len(), 1);

        Ok(())
    }

    #[test]
    fn remove_from_cart_twice_is_a_no_op() -> TestResult {
        let mut commerce = commerce()?;

        commerce.add_to_cart("1", 1)?;
        let line_id = commerce.cart().iter().next().ok_or("missing line")?.id;

        assert!(commerce.remove_from_cart(line_id)?.was_removed());
        assert!(!commerce.remove_from_cart(line_id)?.was_removed());

        Ok(())
    }

    #[test]
    fn removals_report_the_same_toast_either_way() -> TestResult {
        let mut commerce = commerce()?;

        commerce.add_to_cart("1", 1)?;
        let line_id = commerce.cart().iter().next().ok_or("missing line")?.id;

        let first = commerce.remove_from_cart(line_id)?;
        let second = commerce.remove_from_cart(line_id)?;

        assert_eq!(first.notice(), Notice::info("Item removed."));
        assert_eq!(second.notice(), Notice::info("Item removed."));

        commerce.add_to_wishlist("2")?;
        let saved = commerce.wishlist().iter().next().ok_or("missing line")?.id;

        let removal = commerce.remove_from_wishlist(saved)?;
        assert!(removal.was_removed());
        assert_eq!(removal.notice(), Notice::info("Removed from Wishlist."));

        Ok(())
    }

    #[test]
    fn move_to_cart_keeps_entry_by_default() -> TestResult {
        let mut commerce = commerce()?;

        commerce.add_to_wishlist("4")?;
        let line_id = commerce.wishlist().iter().next().ok_or("missing line")?.id;

        let update = commerce.move_to_cart(line_id, 1)?;

        assert!(matches!(update, CartUpdate::Added { .. }));
        assert_eq!(commerce.wishlist().len(), 1);
        assert_eq!(commerce.cart().len(), 1);

        Ok(())
    }

    #[test]
    fn move_to_cart_can_drop_the_entry() -> TestResult {
        let config = CommerceConfig {
            move_to_cart_removes_entry: true,
            ..CommerceConfig::default()
        };
        let mut commerce = Commerce::open(Catalog::seeded()?, MemoryStore::new(), config)?;

        commerce.add_to_wishlist("4")?;
        let line_id = commerce.wishlist().iter().next().ok_or("missing line")?.id;

        commerce.move_to_cart(line_id, 1)?;

        assert!(commerce.wishlist().is_empty());
        assert_eq!(commerce.cart().len(), 1);

        Ok(())
    }

    #[test]
    fn move_to_cart_missing_entry_is_refused() -> TestResult {
        let mut commerce = commerce()?;

        let result = commerce.move_to_cart(Uuid::new_v4(), 1);

        assert!(matches!(
            result,
            Err(CommerceError::WishlistEntryNotFound(_))
        ));
        assert!(commerce.cart().is_empty());

        Ok(())
    }

    #[test]
    fn every_cart_mutation_writes_the_cart_entry() -> TestResult {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get().returning(|_| Ok(None));
        mock.expect_set()
            .withf(|key, _| key == keys::CART)
            .times(1)
            .returning(|_, _| Ok(()));

        let mut commerce =
            Commerce::open(Catalog::seeded()?, mock, CommerceConfig::default())?;

        commerce.add_to_cart("1", 1)?;

        Ok(())
    }

    #[test]
    fn refused_operations_write_nothing() -> TestResult {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get().returning(|_| Ok(None));
        mock.expect_set().times(0);

        let mut commerce =
            Commerce::open(Catalog::seeded()?, mock, CommerceConfig::default())?;

        assert!(commerce.add_to_cart("999", 1).is_err());
        assert!(commerce.checkout().is_err());

        Ok(())
    }

    #[test]
    fn notices_use_the_storefront_wording() -> TestResult {
        let mut commerce = commerce()?;

        let update = commerce.add_to_cart("1", 1)?;
        assert_eq!(
            update.notice().message,
            "Quantum Core Laptop added to cart!"
        );

        let refused = commerce.add_to_cart("999", 1);
        if let Err(error) = refused {
            assert_eq!(error.notice().message, "Product not found.");
        } else {
            return Err("expected a refusal".into());
        }

        Ok(())
    }
}
