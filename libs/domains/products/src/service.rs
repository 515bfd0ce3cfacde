use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, ProductView};
use crate::repository::ProductStore;

/// Business rules for the catalog.
///
/// All five operations go through one reader/writer lock owned by this
/// instance and shared by its clones. `get_product` and `list_products` take
/// it shared; `create_product`, `update_product` and `delete_product` take it
/// exclusively for their whole check-then-act sequence. Writers that bypass
/// the service are not serialized; the store's unique name constraint still
/// applies to them.
pub struct ProductService<S: ProductStore> {
    store: Arc<S>,
    lock: Arc<RwLock<()>>,
}

impl<S: ProductStore> Clone for ProductService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            lock: Arc::clone(&self.lock),
        }
    }
}

fn invalid(e: validator::ValidationErrors) -> ProductError {
    ProductError::Validation(e.to_string())
}

fn log_store_failure(e: &ProductError) {
    if let ProductError::Infrastructure(msg) = e {
        error!(error = %msg, "Product store failure");
    }
}

impl<S: ProductStore> ProductService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            lock: Arc::new(RwLock::new(())),
        }
    }

    /// Store a new product under a name no other product has.
    ///
    /// Any `id` on `input` is ignored.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: ProductView) -> ProductResult<ProductView> {
        debug!("Creating product");
        input.validate().map_err(invalid)?;

        let _guard = self.lock.write().await;

        let existing = self
            .store
            .find_by_name(&input.name)
            .await
            .inspect_err(log_store_failure)?;
        if existing.is_some() {
            warn!("Product already exists");
            return Err(ProductError::AlreadyExists(input.name));
        }

        let product = self
            .store
            .insert(NewProduct::from(input))
            .await
            .inspect_err(log_store_failure)?;

        info!(product_id = product.id, "Product created");
        Ok(product.into())
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<ProductView> {
        debug!("Fetching product");
        let _guard = self.lock.read().await;

        let product = self
            .store
            .find_by_id(id)
            .await
            .inspect_err(log_store_failure)?
            .map(ProductView::from);

        match product {
            Some(view) => {
                info!("Product found");
                Ok(view)
            }
            None => {
                warn!("Product not found");
                Err(ProductError::NotFound(id))
            }
        }
    }

    /// Replace name and price of an existing product, keeping its id.
    ///
    /// The new name is not checked against other products here; a collision
    /// is rejected by the store and surfaces as `Infrastructure`.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update_product(&self, id: i64, input: ProductView) -> ProductResult<ProductView> {
        debug!("Updating product");
        input.validate().map_err(invalid)?;

        let _guard = self.lock.write().await;

        let Some(existing) = self
            .store
            .find_by_id(id)
            .await
            .inspect_err(log_store_failure)?
        else {
            warn!("Product not found");
            return Err(ProductError::NotFound(id));
        };

        let saved = self
            .store
            .save(existing.with_details(NewProduct::from(input)))
            .await
            .inspect_err(log_store_failure)?;

        info!("Product updated");
        Ok(saved.into())
    }

    /// Remove a product and return it as it was before deletion.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<ProductView> {
        debug!("Deleting product");
        let _guard = self.lock.write().await;

        let Some(existing) = self
            .store
            .find_by_id(id)
            .await
            .inspect_err(log_store_failure)?
        else {
            warn!("Product not found");
            return Err(ProductError::NotFound(id));
        };

        self.store
            .delete_by_id(id)
            .await
            .inspect_err(log_store_failure)?;

        info!("Product deleted");
        Ok(existing.into())
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<ProductView>> {
        debug!("Listing products");
        let _guard = self.lock.read().await;

        let products: Vec<ProductView> = self
            .store
            .find_all()
            .await
            .inspect_err(log_store_failure)?
            .into_iter()
            .map(ProductView::from)
            .collect();

        info!(count = products.len(), "Products listed");
        Ok(products)
    }
}
