//! Vitrine
//!
//! Vitrine is a client-side storefront engine: a read-only product catalog,
//! a cart/wishlist/order-history state machine with a durable key-value
//! mirror, and a hash-path router that selects views by name.
//!
//! ```
//! use vitrine::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut shop = Storefront::open(MemoryStore::new(), CommerceConfig::default())?;
//!
//! shop.commerce_mut().add_to_cart("1", 1)?;
//! let placed = shop.commerce_mut().checkout()?;
//!
//! assert!(shop.commerce().cart().is_empty());
//! assert!(shop.commerce().order(&placed.id).is_some());
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod catalog;
pub mod commerce;
pub mod identity;
pub mod notices;
pub mod orders;
pub mod prelude;
pub mod products;
pub mod router;
pub mod store;
pub mod storefront;
pub mod wishlist;
