use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product};

/// Durable product storage.
///
/// Each call is atomic on its own; sequences of calls are coordinated by
/// [`ProductService`](crate::service::ProductService). Every failure,
/// including a violated unique name, is reported as
/// [`ProductError::Infrastructure`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist a new product and return it with its assigned id
    async fn insert(&self, input: NewProduct) -> ProductResult<Product>;

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>>;

    /// Overwrite the product stored under `product.id`
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// Remove a product; absent ids are an error
    async fn delete_by_id(&self, id: i64) -> ProductResult<()>;

    /// All products in ascending id order
    async fn find_all(&self) -> ProductResult<Vec<Product>>;
}

#[derive(Debug)]
struct Table {
    rows: BTreeMap<i64, Product>,
    next_id: i64,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Table {
    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|p| p.name == name && Some(p.id) != except)
    }
}

fn unique_violation(name: &str) -> ProductError {
    ProductError::Infrastructure(format!(
        "unique constraint violated: name '{}' is already stored",
        name
    ))
}

/// In-memory [`ProductStore`] for development and tests.
///
/// Ids come from a counter that only moves forward, and names are unique,
/// matching the Postgres schema.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, input: NewProduct) -> ProductResult<Product> {
        let mut table = self.table.write().await;

        if table.name_taken(&input.name, None) {
            return Err(unique_violation(&input.name));
        }

        let product = Product {
            id: table.next_id,
            name: input.name,
            price: input.price,
        };
        table.next_id += 1;
        table.rows.insert(product.id, product.clone());

        Ok(product)
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|p| p.name == name).cloned())
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let mut table = self.table.write().await;

        if !table.rows.contains_key(&product.id) {
            return Err(ProductError::Infrastructure(format!(
                "no row with id {} to update",
                product.id
            )));
        }
        if table.name_taken(&product.name, Some(product.id)) {
            return Err(unique_violation(&product.name));
        }

        table.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ProductError::Infrastructure(format!("no row with id {} to delete", id)))
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new(name: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_ids_increase_and_are_not_reused() {
        let store = InMemoryProductStore::new();

        let a = store.insert(new("A", 1.0)).await.unwrap();
        let b = store.insert(new("B", 2.0)).await.unwrap();
        assert!(a.id < b.id);

        store.delete_by_id(b.id).await.unwrap();
        let c = store.insert(new("C", 3.0)).await.unwrap();
        assert!(c.id > b.id);
    }

    #[tokio::test]
    async fn test_unique_name_is_enforced() {
        let store = InMemoryProductStore::new();
        let a = store.insert(new("A", 1.0)).await.unwrap();
        store.insert(new("B", 1.0)).await.unwrap();

        let err = store.insert(new("A", 9.0)).await.unwrap_err();
        assert!(matches!(err, ProductError::Infrastructure(_)));

        let err = store
            .save(Product {
                id: a.id,
                name: "B".to_string(),
                price: 1.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Infrastructure(_)));
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_row() {
        let store = InMemoryProductStore::new();
        let a = store.insert(new("A", 1.0)).await.unwrap();

        store
            .save(Product {
                id: a.id,
                name: "A".to_string(),
                price: 5.0,
            })
            .await
            .unwrap();

        assert_eq!(store.find_by_id(a.id).await.unwrap().unwrap().price, 5.0);
        assert_eq!(store.find_by_name("A").await.unwrap().unwrap().id, a.id);
    }

    #[tokio::test]
    async fn test_missing_rows_fail_on_write() {
        let store = InMemoryProductStore::new();

        assert!(matches!(
            store.delete_by_id(42).await,
            Err(ProductError::Infrastructure(_))
        ));
        assert!(matches!(
            store
                .save(Product {
                    id: 42,
                    name: "X".to_string(),
                    price: 1.0
                })
                .await,
            Err(ProductError::Infrastructure(_))
        ));
        assert_eq!(store.find_by_id(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_id() {
        let store = InMemoryProductStore::new();
        for name in ["C", "A", "B"] {
            store.insert(new(name, 1.0)).await.unwrap();
        }

        let names: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["C", "A", "B"]);
    }
}
