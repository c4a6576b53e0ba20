//! Catalog

use rustc_hash::FxHashSet;
use serde::Deserialize;
use thiserror::Error;

use crate::products::Product;

/// The seed catalog shipped with the engine.
const SEED_FIXTURE: &str = include_str!("../fixtures/products.yml");

/// Catalog construction errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// YAML parsing error in a catalog fixture.
    #[error("Failed to parse catalog fixture: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A product was declared without an identifier.
    #[error("Product at position {0} has an empty identifier")]
    EmptyId(usize),

    /// A product was declared without a name.
    #[error("Product {0} has an empty name")]
    EmptyName(String),

    /// A product price was negative.
    #[error("Product {0} has a negative price")]
    NegativePrice(String),

    /// Two products share an identifier.
    #[error("Duplicate product identifier {0}")]
    DuplicateId(String),
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: Vec<Product>,
}

/// Read-only product catalog.
///
/// Lookup is a linear scan over a fixed, small list. If the catalog ever
/// grows beyond seed data, `find_by_id` is the seam to put an index behind.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list, validating each record.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if any product has an empty identifier or
    /// name, a negative price, or a duplicate identifier.
    pub fn new(products: impl Into<Vec<Product>>) -> Result<Self, CatalogError> {
        let products = products.into();
        let mut seen = FxHashSet::default();

        for (position, product) in products.iter().enumerate() {
            if product.id.is_empty() {
                return Err(CatalogError::EmptyId(position));
            }
            if product.name.is_empty() {
                return Err(CatalogError::EmptyName(product.id.clone()));
            }
            if product.price.is_sign_negative() {
                return Err(CatalogError::NegativePrice(product.id.clone()));
            }
            if !seen.insert(product.id.clone()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }

        Ok(Catalog { products })
    }

    /// Parse a catalog from a YAML fixture document.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the document does not parse or fails
    /// record validation.
    pub fn from_yaml(document: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(document)?;

        Self::new(fixture.products)
    }

    /// The built-in demo catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the embedded fixture is malformed.
    pub fn seeded() -> Result<Self, CatalogError> {
        Self::from_yaml(SEED_FIXTURE)
    }

    /// Look up a product by identifier.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// All products in the given category, in catalog order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |product| product.category == category)
    }

    /// Case-insensitive substring search on product names.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Product> {
        let query = query.to_lowercase();

        self.products
            .iter()
            .filter(move |product| product.name.to_lowercase().contains(&query))
    }

    /// The first `count` products, used by the homepage's featured strip.
    pub fn featured(&self, count: usize) -> impl Iterator<Item = &Product> {
        self.products.iter().take(count)
    }

    /// Iterate over all products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Get the number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
