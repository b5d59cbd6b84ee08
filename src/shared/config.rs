/// Runtime configuration
///
/// Values come from the process environment, with `.env` loaded first when
/// present. Everything except `DATABASE_URL` has a default.
use crate::shared::errors::{AppError, AppResult};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(AppError::ValidationError(format!(
                "Invalid STORE_BACKEND: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Postgres => write!(f, "postgres"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestLogBackend {
    Postgres,
    Log,
    Off,
}

impl FromStr for RequestLogBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(RequestLogBackend::Postgres),
            "log" => Ok(RequestLogBackend::Log),
            "off" | "none" => Ok(RequestLogBackend::Off),
            _ => Err(AppError::ValidationError(format!(
                "Invalid REQUEST_LOG: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub store_backend: StoreBackend,
    pub request_log: RequestLogBackend,
    pub db_pool_max_size: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            store_backend: StoreBackend::Postgres,
            request_log: RequestLogBackend::Log,
            db_pool_max_size: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env` and the environment
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>()?,
            None => defaults.port,
        };
        let store_backend = match lookup("STORE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => defaults.store_backend,
        };
        let request_log = match lookup("REQUEST_LOG") {
            Some(raw) => raw.parse()?,
            None => defaults.request_log,
        };
        let db_pool_max_size = match lookup("DB_POOL_MAX_SIZE") {
            Some(raw) => Some(raw.parse::<u32>()?),
            None => None,
        };
        let database_url = lookup("DATABASE_URL");

        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(AppError::ValidationError(
                "DATABASE_URL environment variable not found".to_string(),
            ));
        }
        if request_log == RequestLogBackend::Postgres && store_backend != StoreBackend::Postgres {
            return Err(AppError::ValidationError(
                "REQUEST_LOG=postgres requires STORE_BACKEND=postgres".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            database_url,
            store_backend,
            request_log,
            db_pool_max_size,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
