//! Vitrine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine, CartUpdate},
    catalog::{Catalog, CatalogError},
    commerce::{
        CartRemoval, Commerce, CommerceConfig, CommerceError, PlacedOrder, WishlistRemoval,
        WishlistUpdate,
    },
    identity::UserProfile,
    notices::{Notice, Severity},
    orders::{Order, OrderHistory, OrderStatus},
    products::Product,
    router::{Route, Router, ViewRenderer},
    store::{DirectoryStore, KeyValueStore, MemoryStore, StateStore, StoreError},
    storefront::{Storefront, StorefrontError},
    wishlist::{Wishlist, WishlistLine},
};
