use thiserror::Error;

/// Fallback shown when the server did not provide a usable message
pub const GENERIC_ERROR: &str = "Something went wrong";

/// Errors surfaced by the catalog client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a server answer
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// The message to surface to the user: the server-provided message when
    /// present, a generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Http(_) => GENERIC_ERROR.to_string(),
        }
    }
}

/// Extract the server's error message from a response body.
///
/// Error bodies are `{code, error, message, details}`; anything else falls
/// back to the generic message.
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(ToString::to_string))
        .unwrap_or_else(|| GENERIC_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_from_error_body() {
        let body = r#"{"code":1004,"error":"NOT_FOUND","message":"Product not found"}"#;
        assert_eq!(extract_error_message(body), "Product not found");
    }

    #[test]
    fn test_extract_message_falls_back_on_non_json() {
        assert_eq!(extract_error_message("<html>502</html>"), GENERIC_ERROR);
    }

    #[test]
    fn test_extract_message_falls_back_on_missing_field() {
        assert_eq!(extract_error_message(r#"{"status":"error"}"#), GENERIC_ERROR);
    }

    #[test]
    fn test_api_error_user_message() {
        let err = ClientError::Api {
            status: 404,
            message: "Product not found".to_string(),
        };
        assert_eq!(err.user_message(), "Product not found");
    }
}
