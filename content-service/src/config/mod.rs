use secrecy::Secret;
use serde::Deserialize;
use service_core::config::{self as core_config, env_flag, env_or};
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
    pub store_backend: StoreBackend,
    pub seed_on_startup: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Absent when `DATABASE_URL` is unset; the service then runs without a store.
    pub url: Option<Secret<String>>,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

impl ContentConfig {
    pub fn load() -> Result<Self, AppError> {
        // Handles .env, the configuration file and PORT / APP__PORT.
        let common = core_config::Config::load()?;

        let store_backend = env_or("STORE_BACKEND", "mongo")
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        Ok(ContentConfig {
            common,
            service_name: env_or("SERVICE_NAME", "content-service"),
            log_level: env_or("LOG_LEVEL", "info"),
            otlp_endpoint: non_empty_env("OTLP_ENDPOINT"),
            database: DatabaseConfig {
                url: non_empty_env("DATABASE_URL").map(Secret::new),
                name: env_or("DATABASE_NAME", "aham_eva"),
            },
            store_backend,
            seed_on_startup: env_flag("SEED_ON_STARTUP"),
        })
    }

    pub fn database_url_set(&self) -> bool {
        self.database.url.is_some()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parses_known_names() {
        assert_eq!("mongo".parse::<StoreBackend>(), Ok(StoreBackend::Mongo));
        assert_eq!("MongoDB".parse::<StoreBackend>(), Ok(StoreBackend::Mongo));
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("redis".parse::<StoreBackend>().is_err());
    }
}
