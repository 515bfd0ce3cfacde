use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{NewProduct, Product},
    repository::ProductStore,
};

/// PostgreSQL-backed [`ProductStore`] on the `products` table.
#[derive(Clone)]
pub struct PgProductStore {
    db: DatabaseConnection,
}

impl PgProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: DbErr) -> ProductError {
    ProductError::Infrastructure(format!("Database error: {}", e))
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn insert(&self, input: NewProduct) -> ProductResult<Product> {
        let model = entity::ActiveModel::from(input)
            .insert(&self.db)
            .await
            .map_err(db_error)?;

        tracing::debug!(product_id = model.id, "Inserted product row");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Product::from))
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Product::from))
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let model = entity::ActiveModel::from(product)
            .update(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<()> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(ProductError::Infrastructure(format!(
                "no row with id {} to delete",
                id
            )));
        }

        Ok(())
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Product::from).collect())
    }
}
