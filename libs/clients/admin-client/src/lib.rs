//! Admin Client
//!
//! The admin-side counterpart of the catalog API: a typed REST client plus
//! the product edit form lifecycle.
//!
//! The wire types here deliberately *mirror* the backend contract rather
//! than reusing the domain crate; the client validates what the backend
//! validates, independently.
//!
//! # Usage
//!
//! ```rust,no_run
//! use admin_client::{CatalogClient, ProductEditForm};
//!
//! # async fn example() -> Result<(), admin_client::ClientError> {
//! let client = CatalogClient::new("http://localhost:8080").with_token("jwt...");
//!
//! let mut form = ProductEditForm::new();
//! let product = client.get_product(uuid::Uuid::now_v7()).await?;
//! form.populate(&product);
//!
//! if let Ok(payload) = form.begin_submit() {
//!     match client.update_product(product.id, &payload).await {
//!         Ok(_) => form.submit_succeeded(),
//!         Err(e) => form.submit_failed(e.user_message()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod edit_form;
pub mod error;

pub use api::{CatalogClient, CreateProduct, DeletedResponse, Product, UpdateProduct, UploadResponse};
pub use edit_form::{FieldError, FormError, FormFields, FormPhase, Notice, NoticeKind, ProductEditForm};
pub use error::{ClientError, ClientResult};
