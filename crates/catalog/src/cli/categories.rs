//! Category CLI commands.

use clap::{Parser, Subcommand};

/// Category management commands.
#[derive(Debug, Parser)]
pub struct CategoriesCommand {
    #[command(subcommand)]
    pub action: CategoriesAction,
}

/// Available category actions.
#[derive(Debug, Subcommand)]
pub enum CategoriesAction {
    /// List visible main categories.
    Main {
        /// Maximum number of categories to return.
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Number of categories to skip.
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// List the children of a category.
    Sub {
        /// Parent category ID.
        parent_id: String,
    },
    /// Get category by ID.
    Get {
        /// Category ID.
        id: String,
    },
    /// Get several categories by ID.
    Many {
        /// Category IDs.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Get the main category a category descends from.
    Root {
        /// Category ID.
        id: String,
    },
    /// List all categories.
    List,
    /// Count all categories.
    Count,
    /// Create a new category.
    Create {
        /// Category name.
        #[arg(long)]
        name: String,
        /// Category description.
        #[arg(long)]
        description: Option<String>,
        /// Parent category ID. Omit for a main category.
        #[arg(long)]
        parent: Option<String>,
        /// Hide the category from main category listings.
        #[arg(long)]
        hidden: bool,
    },
    /// Update a category.
    Update {
        /// Category ID.
        id: String,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// New visibility.
        #[arg(long)]
        visible: Option<bool>,
    },
    /// Delete category by ID.
    Delete {
        /// Category ID.
        id: String,
    },
}
