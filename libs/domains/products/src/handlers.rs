//! HTTP handlers for the Products API

use axum::{
    Extension, Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
};
use axum_helpers::{
    JwtAuth, JwtClaims, UuidPath, ValidatedJson, authenticate,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    require_admin,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::uploads::ImageStore;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        create_product,
        update_product,
        delete_product,
        upload_product_image,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct, DeletedResponse, UploadResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Shared state for the products router
pub struct ProductsState<R: ProductRepository> {
    service: ProductService<R>,
    images: Arc<ImageStore>,
}

impl<R: ProductRepository> Clone for ProductsState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            images: Arc::clone(&self.images),
        }
    }
}

/// Confirmation body returned by delete
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub message: String,
}

/// Acknowledgement body returned by image upload
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    /// Public path of the stored file, prefixed with "/"
    pub image: String,
}

/// Create the products router with all HTTP endpoints
///
/// Reads are public. Write routes carry an explicit guard chain evaluated
/// in order before the handler: `authenticate` (verifies the JWT and
/// attaches typed claims), then `require_admin`.
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    auth: JwtAuth,
    images: ImageStore,
) -> Router {
    let state = ProductsState {
        service,
        images: Arc::new(images),
    };

    let public = Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
        .with_state(state.clone());

    // Layers run outermost-last: authenticate is applied last so it runs
    // before require_admin.
    let admin = Router::new()
        .route("/", post(create_product))
        .route("/{id}", patch(update_product).delete(delete_product))
        .route("/{id}/image", patch(upload_product_image))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(auth, authenticate))
        .with_state(state);

    public.merge(admin)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products in the catalog", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = state.service.list_products().await?;
    Ok(Json(products))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    let product = state.service.get_product(id).await?;
    Ok(Json(product))
}

/// Create a new product owned by the authenticated admin
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = state.service.create_product(input, claims.user_id()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace the editable fields of a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = state.service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = DeletedResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<DeletedResponse>> {
    state.service.delete_product(id).await?;
    Ok(Json(DeletedResponse {
        message: "Product deleted successfully".to_string(),
    }))
}

/// Upload a product image
///
/// Stores the file and acknowledges with its public path. The path is not
/// attached to the product record; the client persists it through a
/// subsequent update.
#[utoipa::path(
    patch,
    path = "/{id}/image",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image uploaded", body = UploadResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_product_image<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
    UuidPath(_product_id): UuidPath,
    mut multipart: Multipart,
) -> ProductResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ProductError::InvalidImage)?
    {
        if field.name() != Some("image") {
            continue;
        }
        let Some(file_name) = field.file_name().map(ToString::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(ToString::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|_| ProductError::InvalidImage)?;

        let image = state
            .images
            .save(&file_name, content_type.as_deref(), &bytes)
            .await?;

        return Ok(Json(UploadResponse {
            message: "Image Uploaded".to_string(),
            image,
        }));
    }

    Err(ProductError::InvalidImage)
}
