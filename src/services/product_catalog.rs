use thiserror::Error;
use tracing::{debug, info};

use crate::domain::product::{Product, ProductDetails};
use crate::services::key_value_store::{KeyValueStore, StoreError};

pub const PRODUCTS_KEY: &str = "products";
pub const PRODUCTS_VERSION_KEY: &str = "productsVersion";
/// Stores written under an older version are reseeded with the defaults.
pub const PRODUCTS_VERSION: &str = "v2";

const DEFAULT_PRODUCTS_YAML: &str = include_str!("../../resources/default_products.yaml");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored products are not valid json: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode products: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to parse default products: {0}")]
    Defaults(#[from] serde_yaml::Error),
    #[error("failed to render product: {0}")]
    Render(#[source] serde_yaml::Error),
    #[error("product {0} not found")]
    NotFound(u32),
    #[error("product name must not be empty")]
    MissingName,
    #[error("no free product id is left above the highest stored id")]
    IdSpaceExhausted,
}

pub fn default_products() -> Result<Vec<Product>, CatalogError> {
    Ok(serde_yaml::from_str(DEFAULT_PRODUCTS_YAML)?)
}

/// CRUD over the product list kept under [`PRODUCTS_KEY`] in a store.
pub struct ProductCatalog<S: KeyValueStore> {
    store: S,
    products: Vec<Product>,
}

impl<S: KeyValueStore> ProductCatalog<S> {
    pub fn open(mut store: S) -> Result<Self, CatalogError> {
        let version = store.get(PRODUCTS_VERSION_KEY)?;
        let saved = store.get(PRODUCTS_KEY)?;

        let products = match saved {
            Some(json) if version.as_deref() == Some(PRODUCTS_VERSION) => {
                serde_json::from_str(&json).map_err(CatalogError::Decode)?
            }
            _ => {
                info!(
                    found_version = version.as_deref().unwrap_or("none"),
                    "seeding product catalog with defaults"
                );
                seed_defaults(&mut store)?
            }
        };

        Ok(Self { store, products })
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: u32) -> Result<&Product, CatalogError> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    pub fn add(&mut self, details: ProductDetails) -> Result<Product, CatalogError> {
        require_name(&details)?;
        let id = match self.products.iter().map(|p| p.id).max() {
            Some(max) => max.checked_add(1).ok_or(CatalogError::IdSpaceExhausted)?,
            None => 1,
        };
        let product = Product { id, details };
        let mut products = self.products.clone();
        products.push(product.clone());
        self.commit(products)?;
        debug!(id, "product added");
        Ok(product)
    }

    pub fn update(&mut self, id: u32, details: ProductDetails) -> Result<Product, CatalogError> {
        require_name(&details)?;
        let mut products = self.products.clone();
        let product = products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        product.details = details;
        let updated = product.clone();
        self.commit(products)?;
        debug!(id, "product updated");
        Ok(updated)
    }

    pub fn remove(&mut self, id: u32) -> Result<Product, CatalogError> {
        let mut products = self.products.clone();
        let index = products
            .iter()
            .position(|product| product.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        let removed = products.remove(index);
        self.commit(products)?;
        debug!(id, "product removed");
        Ok(removed)
    }

    /// Drops the stored catalog keys and restores the default products.
    /// Unrelated keys in the store are left alone.
    pub fn reset(&mut self) -> Result<(), CatalogError> {
        for key in self.store.list()? {
            if key == PRODUCTS_KEY || key == PRODUCTS_VERSION_KEY {
                self.store.delete(&key)?;
            }
        }
        self.products = seed_defaults(&mut self.store)?;
        info!(products = self.products.len(), "product catalog reset");
        Ok(())
    }

    #[cfg(test)]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Persists `products` and only then makes them the current catalog.
    fn commit(&mut self, products: Vec<Product>) -> Result<(), CatalogError> {
        write_products(&mut self.store, &products)?;
        self.products = products;
        Ok(())
    }
}

fn seed_defaults<S: KeyValueStore>(store: &mut S) -> Result<Vec<Product>, CatalogError> {
    let defaults = default_products()?;
    write_products(store, &defaults)?;
    store.set(PRODUCTS_VERSION_KEY, PRODUCTS_VERSION.to_string())?;
    Ok(defaults)
}

fn write_products<S: KeyValueStore>(store: &mut S, products: &[Product]) -> Result<(), CatalogError> {
    let json = serde_json::to_string(products).map_err(CatalogError::Encode)?;
    store.set(PRODUCTS_KEY, json)?;
    Ok(())
}

fn require_name(details: &ProductDetails) -> Result<(), CatalogError> {
    if details.name.trim().is_empty() {
        return Err(CatalogError::MissingName);
    }
    Ok(())
}
