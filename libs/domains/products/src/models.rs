use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product entity - represents a catalog entry stored in MongoDB
///
/// The wire format is camelCase; the identifier is serialized as `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB); immutable after creation
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Owning user, set once at creation from the authenticated identity
    pub user: Uuid,
    /// Product name
    pub name: String,
    /// Price in cents
    pub price: i64,
    /// Image URL or server path
    pub image: String,
    /// Brand name
    pub brand: String,
    /// Category name
    pub category: String,
    /// Units currently in stock
    pub count_in_stock: i32,
    /// Number of reviews; maintained outside the edit flow
    pub num_reviews: i32,
    /// Product description
    pub description: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
///
/// The owner is not part of the payload; it is taken from the verified
/// request identity.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Price in cents
    #[validate(range(min = 0))]
    pub price: i64,
    pub image: String,
    #[validate(length(min = 1, max = 100))]
    pub brand: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(range(min = 0))]
    pub count_in_stock: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub num_reviews: i32,
    #[validate(length(min = 1))]
    pub description: String,
}

/// DTO for updating an existing product
///
/// Update is a full replace of exactly these fields: every field is
/// required, so a payload that omits one is rejected instead of silently
/// erasing stored data. `numReviews` and `user` are never touched.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Price in cents
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(length(min = 1))]
    pub description: String,
    pub image: String,
    #[validate(length(min = 1, max = 100))]
    pub brand: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(range(min = 0))]
    pub count_in_stock: i32,
}

impl Product {
    /// Create a new product from a CreateProduct DTO and its owner
    pub fn new(input: CreateProduct, user: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user,
            name: input.name,
            price: input.price,
            image: input.image,
            brand: input.brand,
            category: input.category,
            count_in_stock: input.count_in_stock,
            num_reviews: input.num_reviews,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a full-replace update of the editable fields
    ///
    /// Identifier, owner, review count, and creation time are preserved.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.price = update.price;
        self.description = update.description;
        self.image = update.image;
        self.brand = update.brand;
        self.category = update.category;
        self.count_in_stock = update.count_in_stock;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

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

    #[test]
    fn test_new_assigns_id_owner_and_timestamps() {
        let owner = Uuid::now_v7();
        let product = Product::new(sample_create(), owner);

        assert!(!product.id.is_nil());
        assert_eq!(product.user, owner);
        assert_eq!(product.name, "Phone");
        assert_eq!(product.price, 500);
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_apply_update_replaces_editable_fields() {
        let owner = Uuid::now_v7();
        let mut product = Product::new(sample_create(), owner);
        let id = product.id;
        let created_at = product.created_at;

        product.apply_update(sample_update());

        assert_eq!(product.name, "Phone v2");
        assert_eq!(product.price, 700);
        assert_eq!(product.description, "updated");
        assert_eq!(product.image, "/uploads/y.png");
        assert_eq!(product.count_in_stock, 4);
        // Untouched by update
        assert_eq!(product.id, id);
        assert_eq!(product.user, owner);
        assert_eq!(product.num_reviews, 0);
        assert_eq!(product.created_at, created_at);
        assert!(product.updated_at >= created_at);
    }

    #[test]
    fn test_product_serializes_with_mongo_id_and_camel_case() {
        let product = Product::new(sample_create(), Uuid::now_v7());
        let json = serde_json::to_value(&product).unwrap();

        assert!(json.get("_id").is_some());
        assert!(json.get("countInStock").is_some());
        assert!(json.get("numReviews").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("id").is_none());
        assert!(json.get("count_in_stock").is_none());
    }

    #[test]
    fn test_create_product_deserializes_camel_case_payload() {
        let input: CreateProduct = serde_json::from_value(serde_json::json!({
            "name": "Phone",
            "price": 500,
            "image": "x.png",
            "brand": "Acme",
            "category": "Electronics",
            "countInStock": 10,
            "numReviews": 0,
            "description": "d"
        }))
        .unwrap();

        assert_eq!(input.count_in_stock, 10);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_product_num_reviews_defaults_to_zero() {
        let input: CreateProduct = serde_json::from_value(serde_json::json!({
            "name": "Phone",
            "price": 500,
            "image": "x.png",
            "brand": "Acme",
            "category": "Electronics",
            "countInStock": 10,
            "description": "d"
        }))
        .unwrap();

        assert_eq!(input.num_reviews, 0);
    }

    #[test]
    fn test_update_product_requires_every_field() {
        // Omitting a field must be a deserialization error, not a silent null
        let result: Result<UpdateProduct, _> = serde_json::from_value(serde_json::json!({
            "name": "Phone",
            "description": "d",
            "image": "x.png",
            "brand": "Acme",
            "category": "Electronics",
            "countInStock": 10
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_negative_price_and_stock() {
        let mut input = sample_create();
        input.price = -1;
        assert!(input.validate().is_err());

        let mut update = sample_update();
        update.count_in_stock = -5;
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_name() {
        let mut input = sample_create();
        input.name = String::new();
        assert!(input.validate().is_err());
    }
}
