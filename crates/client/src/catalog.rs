//! In-memory product catalog and selection.

use std::collections::HashMap;

use shopkeeper_core::{Product, ProductId};

use crate::api::ApiClient;
use crate::error::FetchError;

/// Complete server-sourced mapping of product id to snapshot.
pub type Catalog = HashMap<ProductId, Product>;

/// Owns the product collection and the current single-item selection.
pub struct CatalogStore {
    api: ApiClient,
    products: Catalog,
    selection: Option<ProductId>,
}

impl CatalogStore {
    /// Create an empty catalog store over the given API client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            products: Catalog::new(),
            selection: None,
        }
    }

    /// Fetch the full catalog and replace the held one wholesale.
    ///
    /// The response is decoded into a complete map before the store is
    /// touched; on any failure the prior catalog stays exactly as it was.
    /// The selection is left alone even when its id is gone from the new
    /// catalog - [`Self::selected_product`] then resolves to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] as produced by the transport layer.
    pub async fn fetch_all(&mut self, token: &str) -> Result<(), FetchError> {
        let products = self.api.products_all(token).await?;
        self.replace(products);
        Ok(())
    }

    /// Replace the catalog wholesale.
    pub(crate) fn replace(&mut self, products: Catalog) {
        self.products = products;
    }

    /// Set the selection without validating membership.
    pub fn select(&mut self, id: impl Into<ProductId>) {
        self.selection = Some(id.into());
    }

    /// Reset the selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// The selected id, which may no longer be present in the catalog.
    #[must_use]
    pub fn selection(&self) -> Option<&ProductId> {
        self.selection.as_ref()
    }

    /// Resolve the selection against the current catalog.
    #[must_use]
    pub fn selected_product(&self) -> Option<&Product> {
        self.selection.as_ref().and_then(|id| self.products.get(id))
    }

    /// The full product mapping.
    #[must_use]
    pub fn products(&self) -> &Catalog {
        &self.products
    }

    /// Look up a single product.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Number of products held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
