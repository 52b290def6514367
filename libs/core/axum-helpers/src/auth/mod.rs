//! Authentication and authorization module.
//!
//! This module provides:
//! - JWT token creation and verification with typed claims
//! - Guard middlewares for protected and role-gated routes
//!
//! Guard chains are applied as an explicit ordered list on a route group,
//! outermost first: `authenticate` resolves the identity and inserts
//! [`JwtClaims`] into request extensions, then `require_admin` checks the
//! resolved role.
//!
//! # Example
//!
//! ```ignore
//! use axum::{middleware, Router};
//! use axum_helpers::auth::{JwtAuth, JwtConfig, authenticate, require_admin};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let admin_routes = Router::new()
//!     .route("/api/products", post(create_product))
//!     .layer(middleware::from_fn(require_admin))
//!     .layer(middleware::from_fn_with_state(auth, authenticate));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

// Re-export commonly used types
pub use config::JwtConfig;
pub use jwt::{ACCESS_TOKEN_TTL, JwtAuth, JwtClaims, Role};
pub use middleware::{authenticate, require_admin};
