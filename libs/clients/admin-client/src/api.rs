//! Typed REST client for the catalog API

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::error::{ClientError, ClientResult, extract_error_message};

/// A product as served by the catalog API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
    pub name: String,
    /// Price in cents
    pub price: i64,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub count_in_stock: i32,
    pub num_reviews: i32,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for creating a product
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: String,
    pub price: i64,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub count_in_stock: i32,
    pub num_reviews: i32,
    pub description: String,
}

/// Payload for the full-record update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: String,
    pub price: i64,
    pub description: String,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub count_in_stock: i32,
}

/// Confirmation body returned by delete
#[derive(Debug, Clone, Deserialize)]
pub struct DeletedResponse {
    pub message: String,
}

/// Acknowledgement body returned by image upload
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    /// Public path of the stored file, prefixed with "/"
    pub image: String,
}

/// REST client for the catalog API
///
/// Admin calls carry the bearer token set with [`CatalogClient::with_token`].
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach the bearer token used for admin calls.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn products_url(&self) -> String {
        format!("{}/api/products", self.base_url)
    }

    fn product_url(&self, id: Uuid) -> String {
        format!("{}/api/products/{}", self.base_url, id)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn handle<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body);
            tracing::debug!(status = status.as_u16(), %message, "API call failed");
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// GET /api/products
    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        let response = self.http.get(self.products_url()).send().await?;
        Self::handle(response).await
    }

    /// GET /api/products/{id}
    pub async fn get_product(&self, id: Uuid) -> ClientResult<Product> {
        let response = self.http.get(self.product_url(id)).send().await?;
        Self::handle(response).await
    }

    /// POST /api/products
    pub async fn create_product(&self, input: &CreateProduct) -> ClientResult<Product> {
        let request = self.http.post(self.products_url()).json(input);
        let response = self.authorized(request).send().await?;
        Self::handle(response).await
    }

    /// PATCH /api/products/{id}
    pub async fn update_product(&self, id: Uuid, input: &UpdateProduct) -> ClientResult<Product> {
        let request = self.http.patch(self.product_url(id)).json(input);
        let response = self.authorized(request).send().await?;
        Self::handle(response).await
    }

    /// DELETE /api/products/{id}
    pub async fn delete_product(&self, id: Uuid) -> ClientResult<DeletedResponse> {
        let request = self.http.delete(self.product_url(id));
        let response = self.authorized(request).send().await?;
        Self::handle(response).await
    }

    /// PATCH /api/products/{id}/image (multipart)
    ///
    /// The returned path is not persisted to the product record; write it
    /// into the edit form and submit the form to persist it.
    pub async fn upload_image(
        &self,
        id: Uuid,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<UploadResponse> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))
            .map_err(ClientError::Http)?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let request = self
            .http
            .patch(format!("{}/image", self.product_url(id)))
            .multipart(form);
        let response = self.authorized(request).send().await?;
        Self::handle(response).await
    }
}

/// Content type for an image file name, by extension.
fn mime_for(file_name: &str) -> &'static str {
    match file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}
