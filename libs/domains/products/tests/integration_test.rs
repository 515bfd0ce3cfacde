//! Integration tests for the Products domain
//!
//! These use real PostgreSQL via testcontainers to ensure:
//! - The migration creates a table the store can use
//! - Ids come from the database sequence
//! - The unique name constraint is enforced
//! - The service behaves the same on Postgres as on the in-memory store
//!
//! Run with `cargo test -p domain_products -- --ignored` (needs Docker).

use domain_products::*;
use test_utils::{assertions::*, TestDataBuilder, TestDatabase};

// ============================================================================
// Store Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker for the Postgres testcontainer"]
async fn test_insert_and_find_product() {
    let db = TestDatabase::new().await;
    let store = PgProductStore::new(db.connection());
    let builder = TestDataBuilder::from_test_name("insert_and_find");

    let input = NewProduct {
        name: builder.name("product", "main"),
        price: builder.price(1),
    };

    let created = store.insert(input.clone()).await.unwrap();
    assert_eq!(created.name, input.name);
    assert_price_eq(created.price, input.price, "created price");

    let by_id = assert_some(
        store.find_by_id(created.id).await.unwrap(),
        "product should exist by id",
    );
    assert_eq!(by_id, created);

    let by_name = assert_some(
        store.find_by_name(&input.name).await.unwrap(),
        "product should exist by name",
    );
    assert_eq!(by_name.id, created.id);
}

#[tokio::test]
#[ignore = "requires Docker for the Postgres testcontainer"]
async fn test_duplicate_name_constraint() {
    let db = TestDatabase::new().await;
    let store = PgProductStore::new(db.connection());
    let builder = TestDataBuilder::from_test_name("duplicate_name");

    let name = builder.name("product", "duplicate");
    store
        .insert(NewProduct { name: name.clone(), price: 1.0 })
        .await
        .unwrap();

    let result = store.insert(NewProduct { name, price: 2.0 }).await;
    assert!(
        matches!(result, Err(ProductError::Infrastructure(_))),
        "unique index should reject the second insert, got {result:?}"
    );
}

#[tokio::test]
#[ignore = "requires Docker for the Postgres testcontainer"]
async fn test_ids_increase_across_inserts() {
    let db = TestDatabase::new().await;
    let store = PgProductStore::new(db.connection());
    let builder = TestDataBuilder::from_test_name("ids_increase");

    let mut ids = Vec::new();
    for i in 0..3 {
        let product = store
            .insert(NewProduct {
                name: builder.name("product", &format!("p{i}")),
                price: builder.price(i),
            })
            .await
            .unwrap();
        ids.push(product.id);
    }

    assert_strictly_increasing(&ids, "inserted ids");

    let listed: Vec<i64> = store.find_all().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
#[ignore = "requires Docker for the Postgres testcontainer"]
async fn test_delete_missing_row_is_infrastructure_error() {
    let db = TestDatabase::new().await;
    let store = PgProductStore::new(db.connection());

    let result = store.delete_by_id(12345).await;
    assert!(matches!(result, Err(ProductError::Infrastructure(_))));
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker for the Postgres testcontainer"]
async fn test_service_lifecycle_on_postgres() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductStore::new(db.connection()));

    let a = service.create_product(ProductView::new("A", 1.0)).await.unwrap();
    let b = service.create_product(ProductView::new("B", 2.0)).await.unwrap();
    assert_eq!(service.list_products().await.unwrap(), vec![a.clone(), b.clone()]);

    let err = service
        .create_product(ProductView::new("A", 3.0))
        .await
        .unwrap_err();
    assert_eq!(err, ProductError::AlreadyExists("A".to_string()));

    let a_id = a.id.unwrap();
    let updated = service
        .update_product(a_id, ProductView::new("A2", 1.5))
        .await
        .unwrap();
    assert_eq!(updated.id, Some(a_id));
    assert_eq!(service.get_product(a_id).await.unwrap(), updated);

    let deleted = service.delete_product(a_id).await.unwrap();
    assert_eq!(deleted, updated);
    assert_eq!(
        service.get_product(a_id).await.unwrap_err(),
        ProductError::NotFound(a_id)
    );
    assert_eq!(service.list_products().await.unwrap(), vec![b]);
}

#[tokio::test]
#[ignore = "requires Docker for the Postgres testcontainer"]
async fn test_update_to_taken_name_hits_unique_index() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductStore::new(db.connection()));

    service.create_product(ProductView::new("A", 1.0)).await.unwrap();
    let b = service.create_product(ProductView::new("B", 2.0)).await.unwrap();

    let err = service
        .update_product(b.id.unwrap(), ProductView::new("A", 2.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::Infrastructure(_)));
}
