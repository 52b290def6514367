//! Products API routes

use axum::Router;
use axum_helpers::JwtAuth;
use domain_products::{ImageStore, MongoProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create the products router with its guard chain applied
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let service = ProductService::new(repository);
    let auth = JwtAuth::new(&state.config.jwt);
    let images = ImageStore::new(state.config.upload_dir.clone());

    handlers::router(service, auth, images)
}
