use super::jwt::{JwtAuth, JwtClaims};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// Extract a JWT from the Authorization header or cookie
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    // Try Authorization header first: "Bearer <token>"
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        .or_else(|| {
            // Fallback to cookie: "access_token=<token>"
            headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
                        if parts.len() == 2 && parts[0] == "access_token" {
                            Some(parts[1].to_string())
                        } else {
                            None
                        }
                    })
                })
        })
}

/// Authentication guard.
///
/// Validates the JWT from the Authorization header or cookie, and inserts
/// typed [`JwtClaims`] into request extensions on success. Downstream guards
/// and handlers extract the claims instead of re-parsing headers.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, Router};
/// use axum::routing::get;
/// use axum_helpers::auth::{JwtAuth, authenticate};
///
/// let protected_routes = Router::new()
///     .route("/api/protected", get(protected_handler))
///     .layer(middleware::from_fn_with_state(auth.clone(), authenticate));
/// ```
pub async fn authenticate(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match extract_token_from_request(&headers) {
        Some(t) => t,
        None => {
            tracing::debug!("No JWT found in Authorization header or cookie");
            return Err(AppError::Unauthorized("No token provided".to_string()));
        }
    };

    let claims = match auth.verify_token(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return Err(AppError::Unauthorized("Invalid token".to_string()));
        }
    };

    // Token is valid - insert claims into request extensions
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Admin authorization guard.
///
/// Must run after [`authenticate`] in the guard chain: reads the verified
/// [`JwtClaims`] from request extensions and rejects non-admin identities.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let claims = request
        .extensions()
        .get::<JwtClaims>()
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    if !claims.is_admin() {
        tracing::debug!(user_id = %claims.sub, "Rejected non-admin access");
        return Err(AppError::Forbidden(
            "Administrator access required".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtConfig, Role};
    use axum::{Router, body::Body, http::Request as HttpRequest, middleware, routing::get};
    use http::StatusCode;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn test_auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("middleware-test-secret-32-characters!"))
    }

    async fn ok_handler() -> &'static str {
        "ok"
    }

    fn admin_router(auth: JwtAuth) -> Router {
        // Guard chain, outermost first: authenticate, then require_admin
        Router::new()
            .route("/admin", get(ok_handler))
            .layer(middleware::from_fn(require_admin))
            .layer(middleware::from_fn_with_state(auth, authenticate))
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app = admin_router(test_auth());

        let response = app
            .oneshot(HttpRequest::get("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let app = admin_router(test_auth());

        let response = app
            .oneshot(
                HttpRequest::get("/admin")
                    .header("authorization", "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_customer_token_is_forbidden() {
        let auth = test_auth();
        let token = auth
            .create_access_token(Uuid::now_v7(), "c@example.com", "C", &[Role::Customer])
            .unwrap();
        let app = admin_router(auth);

        let response = app
            .oneshot(
                HttpRequest::get("/admin")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_token_passes_both_guards() {
        let auth = test_auth();
        let token = auth
            .create_access_token(Uuid::now_v7(), "a@example.com", "A", &[Role::Admin])
            .unwrap();
        let app = admin_router(auth);

        let response = app
            .oneshot(
                HttpRequest::get("/admin")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_token_from_cookie_is_accepted() {
        let auth = test_auth();
        let token = auth
            .create_access_token(Uuid::now_v7(), "a@example.com", "A", &[Role::Admin])
            .unwrap();
        let app = admin_router(auth);

        let response = app
            .oneshot(
                HttpRequest::get("/admin")
                    .header("cookie", format!("access_token={}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
