use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog::cli::categories::CategoriesAction;
use catalog::cli::products::ProductsAction;
use catalog::cli::{format_output, Cli, Commands, OutputFormat, StorageBackend};
use catalog::config::Config;
use catalog::services::{CategoryService, ProductService};
use catalog::state::Repositories;
use catalog_core::catalog::{
    validate_category, validate_product, CreateCategoryRequest, CreateProductRequest,
    UnitOfMeasurement,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays machine readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog=info,catalog_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    if let Some(ttl) = cli.cache_ttl {
        config.cache_ttl_seconds = ttl;
    }

    let repos = connect(&cli, &config).await?;

    match cli.command {
        Commands::Categories(cmd) => run_categories(cmd.action, &repos, cli.format).await,
        Commands::Products(cmd) => run_products(cmd.action, &repos, cli.format).await,
    }
}

async fn connect(cli: &Cli, config: &Config) -> Result<Repositories> {
    let cached = !cli.no_cache;

    match cli.storage {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage, data will not be persisted");
            Repositories::in_memory(config, cached)
        }
        #[cfg(feature = "dynamodb")]
        StorageBackend::Dynamodb => Repositories::dynamodb(config, cached).await,
        #[cfg(not(feature = "dynamodb"))]
        StorageBackend::Dynamodb => {
            bail!("DynamoDB storage is not available, rebuild with the `dynamodb` feature")
        }
    }
}

fn print<T: serde::Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    println!("{}", format_output(value, format)?);
    Ok(())
}

async fn run_categories(
    action: CategoriesAction,
    repos: &Repositories,
    format: OutputFormat,
) -> Result<()> {
    let categories = &repos.categories;

    match action {
        CategoriesAction::Main { limit, offset } => {
            print(&categories.main_categories(limit, offset).await?, format)
        }
        CategoriesAction::Sub { parent_id } => {
            print(&categories.sub_categories(&parent_id).await?, format)
        }
        CategoriesAction::Get { id } => match categories.find(&id).await? {
            Some(category) => print(&category, format),
            None => bail!("Category not found: {}", id),
        },
        CategoriesAction::Many { ids } => print(&categories.find_many(&ids).await?, format),
        CategoriesAction::Root { id } => print(&categories.find_main_category(&id).await?, format),
        CategoriesAction::List => print(&categories.all().await?, format),
        CategoriesAction::Count => print(&categories.total().await?, format),
        CategoriesAction::Create {
            name,
            description,
            parent,
            hidden,
        } => {
            let mut request = CreateCategoryRequest::new(name).with_visible(!hidden);
            if let Some(description) = description {
                request = request.with_description(description);
            }
            if let Some(parent) = parent {
                request = request.with_parent(parent);
            }
            let category = CategoryService::new(Arc::clone(categories))
                .new_category(request)
                .await?;
            print(&category, format)
        }
        CategoriesAction::Update {
            id,
            name,
            description,
            visible,
        } => {
            let mut category = categories
                .find(&id)
                .await?
                .with_context(|| format!("Category not found: {}", id))?;
            if let Some(name) = name {
                category.name = name;
            }
            if let Some(description) = description {
                category.description = Some(description);
            }
            if let Some(visible) = visible {
                category.visible = visible;
            }
            validate_category(&category)?;
            categories.update(&id, &category).await?;
            print(&category, format)
        }
        CategoriesAction::Delete { id } => {
            categories.remove(&id).await?;
            tracing::info!(category_id = %id, "Category deleted");
            Ok(())
        }
    }
}

async fn run_products(
    action: ProductsAction,
    repos: &Repositories,
    format: OutputFormat,
) -> Result<()> {
    let products = &repos.products;

    match action {
        ProductsAction::Get { id } => match products.find_one(&id).await? {
            Some(product) => print(&product, format),
            None => bail!("Product not found: {}", id),
        },
        ProductsAction::Many { ids } => print(&products.find_many(&ids).await?, format),
        ProductsAction::ByCategory { category_id } => {
            print(&products.find_by_category_id(&category_id).await?, format)
        }
        ProductsAction::List => print(&products.all().await?, format),
        ProductsAction::Create {
            name,
            category_id,
            price,
            description,
            quantity,
            unit,
        } => {
            let mut request = CreateProductRequest::new(name, category_id, price);
            if let Some(description) = description {
                request = request.with_description(description);
            }
            if let (Some(quantity), Some(unit)) = (quantity, unit) {
                request = request.with_unit_of_measurement(UnitOfMeasurement::new(quantity, unit));
            }
            let product = ProductService::new(Arc::clone(products))
                .new_product(request)
                .await?;
            print(&product, format)
        }
        ProductsAction::Update {
            id,
            name,
            price,
            description,
        } => {
            let mut product = products
                .find_one(&id)
                .await?
                .with_context(|| format!("Product not found: {}", id))?;
            if let Some(name) = name {
                product.name = name;
            }
            if let Some(price) = price {
                product.price = price;
            }
            if let Some(description) = description {
                product.description = Some(description);
            }
            validate_product(&product)?;
            products.update(&id, &product).await?;
            print(&product, format)
        }
        ProductsAction::Delete { id } => {
            products.delete(&id).await?;
            tracing::info!(product_id = %id, "Product deleted");
            Ok(())
        }
    }
}
