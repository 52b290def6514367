use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Access token time-to-live in seconds
pub const ACCESS_TOKEN_TTL: i64 = 900; // 15 minutes

/// Authorization role carried in JWT claims
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    /// Full write access to the catalog
    Admin,
    /// Regular shopper account
    #[default]
    Customer,
}

/// Typed JWT claims structure
///
/// Inserted into request extensions by the `authenticate` guard so handlers
/// can extract the verified identity without touching raw headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// User email
    pub email: String,
    /// User display name
    pub name: String,
    /// User roles
    pub roles: Vec<Role>,
    /// Expiration time (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// JWT ID
    pub jti: String,
}

impl JwtClaims {
    /// The authenticated user's id.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

/// Stateless JWT authentication (HS256)
///
/// Token issuance/refresh/revocation protocols live with the identity
/// service; this type only mints test/access tokens and verifies signatures.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
}

impl JwtAuth {
    /// Create a new JWT auth instance from configuration.
    ///
    /// # Example
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let auth = JwtAuth::new(&JwtConfig::from_env()?);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Create an access token (15 min)
    pub fn create_access_token(
        &self,
        user_id: Uuid,
        email: &str,
        name: &str,
        roles: &[Role],
    ) -> eyre::Result<String> {
        self.create_token(user_id, email, name, roles, ACCESS_TOKEN_TTL)
    }

    /// Create a JWT token with the specified TTL
    fn create_token(
        &self,
        user_id: Uuid,
        email: &str,
        name: &str,
        roles: &[Role],
        ttl_seconds: i64,
    ) -> eyre::Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::seconds(ttl_seconds)).timestamp();
        let iat = now.timestamp();
        let jti = Uuid::new_v4().to_string();

        let claims = JwtClaims {
            sub: user_id,
            email: email.to_string(),
            name: name.to_string(),
            roles: roles.to_vec(),
            exp,
            iat,
            jti,
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify a JWT token signature and decode its claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("unit-test-secret-that-is-long-enough!!"))
    }

    #[test]
    fn test_token_round_trip() {
        let auth = test_auth();
        let user_id = Uuid::now_v7();

        let token = auth
            .create_access_token(user_id, "admin@example.com", "Admin", &[Role::Admin])
            .unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "admin@example.com");
        assert!(claims.is_admin());
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_customer_is_not_admin() {
        let auth = test_auth();
        let token = auth
            .create_access_token(Uuid::now_v7(), "c@example.com", "C", &[Role::Customer])
            .unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert!(!claims.is_admin());
        assert!(claims.has_role(Role::Customer));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let auth = test_auth();
        let token = auth
            .create_access_token(Uuid::now_v7(), "a@example.com", "A", &[Role::Admin])
            .unwrap();

        let other = JwtAuth::new(&JwtConfig::new("a-completely-different-32-char-secret!"));
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let auth = test_auth();
        let token = auth
            .create_token(Uuid::now_v7(), "a@example.com", "A", &[Role::Admin], -120)
            .unwrap();

        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let auth = test_auth();
        let mut token = auth
            .create_access_token(Uuid::now_v7(), "a@example.com", "A", &[Role::Admin])
            .unwrap();
        token.push('x');

        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn test_role_string_representation() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::Customer.to_string(), "customer");
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }
}
