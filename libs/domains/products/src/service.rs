//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The service layer handles validation and orchestrates repository
/// operations.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product owned by the authenticated user
    #[instrument(skip(self, input), fields(product_name = %input.name, owner = %owner))]
    pub async fn create_product(
        &self,
        input: CreateProduct,
        owner: Uuid,
    ) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input, owner).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List all products
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Replace the editable fields of an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        self.repository.delete(id).await?;
        Ok(())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;

    fn sample_create() -> CreateProduct {
        CreateProduct {
            name: "Phone".to_string(),
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
    async fn test_create_product_sets_owner_from_identity() {
        let owner = Uuid::now_v7();

        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .withf(move |input, got_owner| input.name == "Phone" && *got_owner == owner)
            .returning(|input, owner| Ok(Product::new(input, owner)));

        let service = ProductService::new(repo);
        let product = service.create_product(sample_create(), owner).await.unwrap();

        assert_eq!(product.user, owner);
        assert!(!product.id.is_nil());
    }

    #[tokio::test]
    async fn test_create_product_rejects_invalid_input_before_repository() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().never();

        let service = ProductService::new(repo);
        let mut input = sample_create();
        input.price = -1;

        let err = service
            .create_product(input, Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_product_absent_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ProductService::new(repo);
        let err = service.get_product(Uuid::now_v7()).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(_)));
        assert_eq!(err.to_string(), "Product not found");
    }

    #[tokio::test]
    async fn test_update_product_replaces_fields_and_preserves_the_rest() {
        let owner = Uuid::now_v7();
        let existing = Product::new(sample_create(), owner);
        let id = existing.id;

        let mut repo = MockProductRepository::new();
        let baseline = existing.clone();
        repo.expect_update().returning(move |_, input| {
            let mut updated = baseline.clone();
            updated.apply_update(input);
            Ok(updated)
        });

        let service = ProductService::new(repo);
        let updated = service.update_product(id, sample_update()).await.unwrap();

        assert_eq!(updated.name, "Phone v2");
        assert_eq!(updated.price, 700);
        assert_eq!(updated.user, owner);
        assert_eq!(updated.num_reviews, 0);
        assert_eq!(updated.id, id);
    }

    #[tokio::test]
    async fn test_update_product_rejects_invalid_input_before_repository() {
        let mut repo = MockProductRepository::new();
        repo.expect_update().never();

        let service = ProductService::new(repo);
        let mut input = sample_update();
        input.name = String::new();

        let err = service
            .update_product(Uuid::now_v7(), input)
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_product_absent_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_update()
            .returning(|id, _| Err(ProductError::NotFound(id)));

        let service = ProductService::new(repo);
        let err = service
            .update_product(Uuid::now_v7(), sample_update())
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_product_absent_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete()
            .returning(|id| Err(ProductError::NotFound(id)));

        let service = ProductService::new(repo);
        let err = service.delete_product(Uuid::now_v7()).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_product_success() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete().returning(|_| Ok(true));

        let service = ProductService::new(repo);
        assert!(service.delete_product(Uuid::now_v7()).await.is_ok());
    }
}
