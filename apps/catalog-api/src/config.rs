//! Configuration for the Catalog API

use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;
use std::path::PathBuf;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub jwt: JwtConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Directory where uploaded product images are stored; also the public
    /// path prefix of stored files
    pub upload_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let upload_dir = PathBuf::from(env_or_default("UPLOAD_DIR", "uploads"));

        Ok(Self {
            app: app_info!(),
            mongodb,
            jwt,
            server,
            environment,
            upload_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("catalog")),
                ("JWT_SECRET", Some("a-32-character-minimum-jwt-secret!!!")),
                ("UPLOAD_DIR", None::<&str>),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.mongodb.database(), "catalog");
                assert_eq!(config.upload_dir, PathBuf::from("uploads"));
            },
        );
    }

    #[test]
    fn test_config_requires_jwt_secret() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("catalog")),
                ("JWT_SECRET", None::<&str>),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
