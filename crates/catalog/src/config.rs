use std::{env, time::Duration};

/// Catalog configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Memoization TTL in seconds (default: 300). Negative values behave as 0.
    pub cache_ttl_seconds: i64,
    /// Maximum number of cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Categories table name (default: "categories")
    pub categories_table: String,
    /// Products table name (default: "products")
    pub products_table: String,
    /// Custom DynamoDB endpoint, e.g. a local instance (default: none)
    pub aws_endpoint_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Memoization TTL in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `CATEGORIES_TABLE` - Categories table name (default: "categories")
    /// - `PRODUCTS_TABLE` - Products table name (default: "products")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: none)
    pub fn from_env() -> Self {
        Self {
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            categories_table: env::var("CATEGORIES_TABLE")
                .unwrap_or_else(|_| "categories".to_string()),
            products_table: env::var("PRODUCTS_TABLE").unwrap_or_else(|_| "products".to_string()),
            aws_endpoint_url: env::var("AWS_ENDPOINT_URL").ok().filter(|v| !v.is_empty()),
        }
    }

    /// Get the memoization TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds.max(0) as u64)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
