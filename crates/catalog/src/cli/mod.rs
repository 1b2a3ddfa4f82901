//! CLI command definitions.

pub mod categories;
pub mod products;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

/// Catalog data access from the command line.
#[derive(Debug, Parser)]
#[command(name = "catalog")]
#[command(version, about = "Query and manage catalog categories and products", long_about = None)]
pub struct Cli {
    /// Storage backend.
    #[arg(long, env = "CATALOG_STORAGE", default_value = "dynamodb")]
    pub storage: StorageBackend,

    /// Bypass the memoizing cache and hit storage on every read.
    #[arg(long)]
    pub no_cache: bool,

    /// Memoization TTL in seconds (overrides CACHE_TTL_SECONDS). Negative values behave as 0.
    #[arg(long, allow_negative_numbers = true)]
    pub cache_ttl: Option<i64>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Storage backend options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// Process-local maps. Data is lost on exit.
    Memory,
    /// DynamoDB tables configured through the environment.
    Dynamodb,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON output.
    Json,
    /// Indented JSON output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Category management.
    Categories(categories::CategoriesCommand),
    /// Product management.
    Products(products::ProductsCommand),
}

/// Format a value for output.
pub fn format_output<T: Serialize>(value: &T, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Pretty => serde_json::to_string_pretty(value),
    }
}
