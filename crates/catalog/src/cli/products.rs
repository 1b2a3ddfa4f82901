//! Product CLI commands.

use clap::{Parser, Subcommand};

/// Product management commands.
#[derive(Debug, Parser)]
pub struct ProductsCommand {
    #[command(subcommand)]
    pub action: ProductsAction,
}

/// Available product actions.
#[derive(Debug, Subcommand)]
pub enum ProductsAction {
    /// Get product by ID.
    Get {
        /// Product ID.
        id: String,
    },
    /// Get several products by ID.
    Many {
        /// Product IDs.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// List the products of a category.
    ByCategory {
        /// Category ID.
        category_id: String,
    },
    /// List all products.
    List,
    /// Create a new product.
    Create {
        /// Product name.
        #[arg(long)]
        name: String,
        /// Category the product belongs to.
        #[arg(long)]
        category_id: String,
        /// Product price.
        #[arg(long)]
        price: f64,
        /// Product description.
        #[arg(long)]
        description: Option<String>,
        /// Quantity per unit sold.
        #[arg(long, requires = "unit")]
        quantity: Option<f64>,
        /// Unit the quantity is measured in.
        #[arg(long, requires = "quantity")]
        unit: Option<String>,
    },
    /// Update a product.
    Update {
        /// Product ID.
        id: String,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New price.
        #[arg(long)]
        price: Option<f64>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete product by ID.
    Delete {
        /// Product ID.
        id: String,
    },
}
