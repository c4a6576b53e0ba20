//! Persistent store
//!
//! The durable mirror of the commerce collections. A [`KeyValueStore`] is the
//! storage backend seam (files, memory, a mock in tests); [`StateStore`] adds
//! the JSON codec, the fixed entry names and the all-or-nothing corruption
//! recovery on top.

use mockall::automock;
use thiserror::Error;
use tracing::{info, warn};

use crate::{cart::Cart, identity, orders::OrderHistory, wishlist::Wishlist};

pub mod directory;
pub mod memory;

pub use directory::DirectoryStore;
pub use memory::MemoryStore;

/// Fixed entry names in the backing store.
pub mod keys {
    /// Cart collection entry.
    pub const CART: &str = "cart";

    /// Wishlist collection entry.
    pub const WISHLIST: &str = "wishlist";

    /// Order history entry.
    pub const ORDERS: &str = "orders";

    /// Device user identifier entry.
    pub const USER_ID: &str = "user_id";
}

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend read or write failure.
    #[error("storage backend error")]
    Backend(#[from] std::io::Error),

    /// A collection could not be serialized for writing.
    #[error("failed to serialize the {0} entry")]
    Serialize(&'static str, #[source] serde_json::Error),
}

/// String key-value storage, shaped like the browser storage it stands in
/// for. Values are opaque to the backend; [`StateStore`] owns the encoding.
#[automock]
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the entry under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Delete every entry.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be written.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// The three persisted collections, as read at startup.
#[derive(Debug, Clone, Default)]
pub struct PersistedState {
    /// Cart collection, empty if absent.
    pub cart: Cart,

    /// Wishlist collection, empty if absent.
    pub wishlist: Wishlist,

    /// Order history, empty if absent.
    pub orders: OrderHistory,
}

/// JSON codec over a [`KeyValueStore`].
///
/// The commerce state machine writes through this after every mutation so
/// the durable copy never diverges from memory across a restart.
#[derive(Debug)]
pub struct StateStore<S> {
    inner: S,
}

impl<S: KeyValueStore> StateStore<S> {
    /// Wrap a storage backend.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Read all three collections, defaulting absent entries to empty.
    ///
    /// If any entry fails to deserialize, every entry is discarded and empty
    /// defaults are returned. Recovery is deliberately all-or-nothing: a
    /// half-recovered device (orders without the cart that produced them)
    /// would be harder to reason about than a fresh one.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] only for backend failures; corrupt data is
    /// recovered from, not reported.
    pub fn load(&mut self) -> Result<PersistedState, StoreError> {
        let cart = self.inner.get(keys::CART)?;
        let wishlist = self.inner.get(keys::WISHLIST)?;
        let orders = self.inner.get(keys::ORDERS)?;

        match decode(cart.as_deref(), wishlist.as_deref(), orders.as_deref()) {
            Ok(state) => Ok(state),
            Err(error) => {
                warn!(%error, "persisted state is corrupt, discarding all entries");
                self.inner.clear()?;

                Ok(PersistedState::default())
            }
        }
    }

    /// Write the cart entry.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if encoding or the backend write fails.
    pub fn save_cart(&mut self, cart: &Cart) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(cart).map_err(|e| StoreError::Serialize(keys::CART, e))?;

        self.inner.set(keys::CART, &json)
    }

    /// Write the wishlist entry.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if encoding or the backend write fails.
    pub fn save_wishlist(&mut self, wishlist: &Wishlist) -> Result<(), StoreError> {
        let json = serde_json::to_string(wishlist)
            .map_err(|e| StoreError::Serialize(keys::WISHLIST, e))?;

        self.inner.set(keys::WISHLIST, &json)
    }

    /// Write the order history entry.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if encoding or the backend write fails.
    pub fn save_orders(&mut self, orders: &OrderHistory) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(orders).map_err(|e| StoreError::Serialize(keys::ORDERS, e))?;

        self.inner.set(keys::ORDERS, &json)
    }

    /// Return the persisted device user identifier, generating and storing
    /// one on first run.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be read or written.
    pub fn ensure_user_id(&mut self) -> Result<String, StoreError> {
        if let Some(uid) = self.inner.get(keys::USER_ID)? {
            return Ok(uid);
        }

        let uid = identity::device_token(&mut rand::thread_rng());
        self.inner.set(keys::USER_ID, &uid)?;
        info!(%uid, "generated device user identifier");

        Ok(uid)
    }

    /// Borrow the storage backend.
    pub fn backend(&self) -> &S {
        &self.inner
    }

    /// Borrow the storage backend mutably.
    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.inner
    }
}

fn decode(
    cart: Option<&str>,
    wishlist: Option<&str>,
    orders: Option<&str>,
) -> Result<PersistedState, serde_json::Error> {
    Ok(PersistedState {
        cart: cart.map(serde_json::from_str).transpose()?.unwrap_or_default(),
        wishlist: wishlist
            .map(serde_json::from_str)
            .transpose()?
            .unwrap_or_default(),
        orders: orders
            .map(serde_json::from_str)
            .transpose()?
            .unwrap_or_default(),
    })
}
