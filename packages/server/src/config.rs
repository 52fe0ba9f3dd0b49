use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret_key: String,
    pub jwt_algorithm: String,
    pub jwt_expire_days: i64,
    pub scheduler_worker_concurrency: usize,
    pub scheduler_poll_interval_ms: u64,
    pub scheduler_lease_seconds: i64,
}

impl Config {
    /// Load configuration from environment variables, falling back to a
    /// `.env` file in the current directory if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret_key: env::var("JWT_SECRET_KEY").context("JWT_SECRET_KEY must be set")?,
            jwt_algorithm: env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string()),
            jwt_expire_days: env::var("JWT_EXPIRE_DAYS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("JWT_EXPIRE_DAYS must be a valid number")?,
            scheduler_worker_concurrency: env::var("SCHEDULER_WORKER_CONCURRENCY")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .context("SCHEDULER_WORKER_CONCURRENCY must be a valid number")?,
            scheduler_poll_interval_ms: env::var("SCHEDULER_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .context("SCHEDULER_POLL_INTERVAL_MS must be a valid number")?,
            scheduler_lease_seconds: env::var("SCHEDULER_LEASE_SECONDS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .context("SCHEDULER_LEASE_SECONDS must be a valid number")?,
        })
    }
}
