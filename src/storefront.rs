//! Storefront
//!
//! The constructed application-state object: catalog, commerce state
//! machine, router and user profile assembled around one storage backend.
//! Nothing is ambient, so independent instances (one per test, one per
//! session) never interfere.

use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    commerce::{Commerce, CommerceConfig, CommerceError},
    identity::UserProfile,
    router::Router,
    store::{KeyValueStore, StateStore, StoreError},
};

/// Startup errors.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The catalog could not be built.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The persisted collections could not be read.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// The device identifier could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A complete storefront session over one storage backend.
#[derive(Debug)]
pub struct Storefront<S> {
    commerce: Commerce<S>,
    router: Router,
    profile: UserProfile,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Open a session with the built-in demo catalog.
    ///
    /// Ensures the device user identifier exists, loads the persisted
    /// collections (recovering from corruption by starting fresh), and
    /// positions the router at home.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if the embedded catalog fixture is
    /// malformed or the storage backend fails.
    pub fn open(store: S, config: CommerceConfig) -> Result<Self, StorefrontError> {
        Self::with_catalog(Catalog::seeded()?, store, config)
    }

    /// Open a session with an explicit catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if the storage backend fails.
    pub fn with_catalog(
        catalog: Catalog,
        store: S,
        config: CommerceConfig,
    ) -> Result<Self, StorefrontError> {
        let mut store = StateStore::new(store);
        let uid = store.ensure_user_id()?;
        let profile = UserProfile::guest(uid);

        debug!(uid = %profile.uid, "session opened");

        let commerce = Commerce::open_with_store(catalog, store, config)?;

        Ok(Self {
            commerce,
            router: Router::new(),
            profile,
        })
    }

    /// The commerce state machine.
    pub fn commerce(&self) -> &Commerce<S> {
        &self.commerce
    }

    /// The commerce state machine, mutably.
    pub fn commerce_mut(&mut self) -> &mut Commerce<S> {
        &mut self.commerce
    }

    /// The router.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// The router, mutably.
    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    /// The device-scoped user profile.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }
}
