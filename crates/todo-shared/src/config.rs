//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_SESSION_TTL_SECONDS, DEVELOPMENT_SESSION_SECRET, SESSION_COOKIE_NAME,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub secret: String,
    pub ttl_seconds: i64,
    pub cookie_name: String,
    pub secure: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        let config: AppConfig = config.try_deserialize()?;
        config.ensure_secure()?;
        Ok(config)
    }

    /// Defaults only, without files or environment. Used by tests and tooling.
    pub fn defaults() -> Result<Self, AppError> {
        Ok(Self::builder()?.build()?.try_deserialize()?)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "todo-server")?
            .set_default("database.url", "sqlite::memory:")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_seconds", 3)?
            .set_default("session.secret", DEVELOPMENT_SESSION_SECRET)?
            .set_default("session.ttl_seconds", DEFAULT_SESSION_TTL_SECONDS)?
            .set_default("session.cookie_name", SESSION_COOKIE_NAME)?
            .set_default("session.secure", false)
    }

    pub fn is_development(&self) -> bool {
        self.app.env == "development"
    }

    fn ensure_secure(&self) -> Result<(), AppError> {
        if !self.is_development() && self.session.secret == DEVELOPMENT_SESSION_SECRET {
            return Err(AppError::InsecureConfig(format!(
                "session.secret must be set outside development (env: {})",
                self.app.env
            )));
        }
        if self.session.ttl_seconds <= 0 {
            return Err(AppError::InsecureConfig(
                "session.ttl_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
