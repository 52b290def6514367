//! Integration tests for the MongoDB repository
//!
//! Runs against a disposable MongoDB container.

use domain_products::{
    CreateProduct, MongoProductRepository, ProductError, ProductRepository, UpdateProduct,
};
use test_utils::{TestDataBuilder, TestMongo};
use uuid::Uuid;

fn sample_create(name: &str) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        price: 500,
        image: "x.png".to_string(),
        brand: "Acme".to_string(),
        category: "Electronics".to_string(),
        count_in_stock: 10,
        num_reviews: 0,
        description: "d".to_string(),
    }
}

fn sample_update() -> UpdateProduct {
    UpdateProduct {
        name: "Phone v2".to_string(),
        price: 700,
        description: "updated".to_string(),
        image: "/uploads/y.png".to_string(),
        brand: "Acme".to_string(),
        category: "Electronics".to_string(),
        count_in_stock: 4,
    }
}

#[tokio::test]
async fn test_full_product_lifecycle() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_test");
    let repo = MongoProductRepository::with_collection(&db, "products_lifecycle");

    let builder = TestDataBuilder::from_test_name("test_full_product_lifecycle");
    let owner = builder.user_id();

    // Empty store lists nothing
    assert!(repo.list().await.unwrap().is_empty());

    // Create
    let created = repo
        .create(sample_create(&builder.name("product", "main")), owner)
        .await
        .unwrap();
    assert_eq!(created.user, owner);
    assert!(!created.id.is_nil());

    // Get
    let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.price, 500);

    // List
    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 1);

    // Update replaces the editable fields and preserves the rest
    let updated = repo.update(created.id, sample_update()).await.unwrap();
    assert_eq!(updated.name, "Phone v2");
    assert_eq!(updated.price, 700);
    assert_eq!(updated.user, owner);
    assert_eq!(updated.num_reviews, 0);

    let refetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(refetched.name, "Phone v2");

    // Delete, then the document is gone
    assert!(repo.delete(created.id).await.unwrap());
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_absent_ids_yield_not_found() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_test");
    let repo = MongoProductRepository::with_collection(&db, "products_absent");

    let missing = Uuid::now_v7();

    assert!(repo.get_by_id(missing).await.unwrap().is_none());

    let update_err = repo.update(missing, sample_update()).await.unwrap_err();
    assert!(matches!(update_err, ProductError::NotFound(_)));

    let delete_err = repo.delete(missing).await.unwrap_err();
    assert!(matches!(delete_err, ProductError::NotFound(_)));
}

#[tokio::test]
async fn test_list_returns_all_documents() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_test");
    let repo = MongoProductRepository::with_collection(&db, "products_list");

    let owner = Uuid::now_v7();
    for i in 0..3 {
        repo.create(sample_create(&format!("product-{}", i)), owner)
            .await
            .unwrap();
    }

    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 3);
}
