//! DynamoDB repository implementation.
//!
//! Implements the repository traits from `catalog_core::storage` using one
//! DynamoDB table per entity family, keyed by `id`.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, KeysAndAttributes, Select};
use aws_sdk_dynamodb::Client;

use catalog_core::catalog::{paginate, Category, Product};
use catalog_core::storage::{CategoryRepository, ProductRepository, RepositoryError, Result};

use super::conversions::{
    category_to_item, id_key, item_to_category, item_to_product, product_to_item,
    MAIN_CATEGORY_FLAG,
};
use super::error::{
    map_batch_get_item_error, map_delete_item_error, map_get_item_error, map_put_item_error,
    map_query_error, map_scan_error,
};

/// Index over `isMainCategory`, used to list top-level categories.
pub const MAIN_CATEGORY_INDEX: &str = "isMainCategory-index";
/// Index over `parentCategoryId`, used to list sub categories.
pub const PARENT_CATEGORY_INDEX: &str = "parentCategoryId-index";
/// Index over `id` and `name`, scanned to list every category.
pub const ID_NAME_INDEX: &str = "id-name-index";
/// Index over `categoryId`, used to list the products of a category.
pub const CATEGORY_ID_INDEX: &str = "categoryId-index";

/// BatchGetItem accepts at most this many keys per request.
const BATCH_GET_MAX_KEYS: usize = 100;
/// Extra rounds spent on keys DynamoDB reports as unprocessed.
const BATCH_GET_MAX_RETRIES: usize = 3;

type Item = HashMap<String, AttributeValue>;

/// DynamoDB-backed category repository.
pub struct DynamoDbCategoryRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbCategoryRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

/// DynamoDB-backed product repository.
pub struct DynamoDbProductRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbProductRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

// ============================================================================
// Shared request helpers
// ============================================================================

/// Queries an index for `attribute = :value`, following every result page.
async fn query_index(
    client: &Client,
    table_name: &str,
    index_name: &str,
    attribute: &str,
    value: AttributeValue,
    visible_only: bool,
) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    let mut start_key: Option<Item> = None;

    loop {
        let mut request = client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .key_condition_expression("#key = :value")
            .expression_attribute_names("#key", attribute)
            .expression_attribute_values(":value", value.clone())
            .set_exclusive_start_key(start_key.take());

        if visible_only {
            request = request
                .filter_expression("#visible = :visible")
                .expression_attribute_names("#visible", "visible")
                .expression_attribute_values(":visible", AttributeValue::Bool(true));
        }

        let output = request.send().await.map_err(map_query_error)?;
        items.extend(output.items.unwrap_or_default());

        match output.last_evaluated_key {
            Some(key) if !key.is_empty() => start_key = Some(key),
            _ => break,
        }
    }

    Ok(items)
}

/// Scans a table, or one of its indexes, following every result page.
async fn scan_all(client: &Client, table_name: &str, index_name: Option<&str>) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    let mut start_key: Option<Item> = None;

    loop {
        let output = client
            .scan()
            .table_name(table_name)
            .set_index_name(index_name.map(str::to_string))
            .set_exclusive_start_key(start_key.take())
            .send()
            .await
            .map_err(map_scan_error)?;
        items.extend(output.items.unwrap_or_default());

        match output.last_evaluated_key {
            Some(key) if !key.is_empty() => start_key = Some(key),
            _ => break,
        }
    }

    Ok(items)
}

/// Counts the items of a table, following every result page.
async fn count_all(client: &Client, table_name: &str) -> Result<i64> {
    let mut total = 0i64;
    let mut start_key: Option<Item> = None;

    loop {
        let output = client
            .scan()
            .table_name(table_name)
            .select(Select::Count)
            .set_exclusive_start_key(start_key.take())
            .send()
            .await
            .map_err(map_scan_error)?;
        total += i64::from(output.count);

        match output.last_evaluated_key {
            Some(key) if !key.is_empty() => start_key = Some(key),
            _ => break,
        }
    }

    Ok(total)
}

/// Fetches the items whose `id` is in `ids`, in request order.
///
/// Duplicate and missing IDs are skipped. Keys still unprocessed after the
/// retry budget are logged and left out of the result.
async fn batch_get(client: &Client, table_name: &str, ids: &[String]) -> Result<Vec<Item>> {
    let mut seen = HashSet::new();
    let unique: Vec<&String> = ids.iter().filter(|id| seen.insert(id.as_str())).collect();
    if unique.is_empty() {
        return Ok(Vec::new());
    }

    let mut found: HashMap<String, Item> = HashMap::new();

    for chunk in unique.chunks(BATCH_GET_MAX_KEYS) {
        let keys = chunk.iter().map(|id| id_key(id)).collect();
        let keys_and_attributes = KeysAndAttributes::builder()
            .set_keys(Some(keys))
            .build()
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        let mut request_items = Some(HashMap::from([(
            table_name.to_string(),
            keys_and_attributes,
        )]));

        for attempt in 0..=BATCH_GET_MAX_RETRIES {
            let Some(pending) = request_items.take() else {
                break;
            };

            let output = client
                .batch_get_item()
                .set_request_items(Some(pending))
                .send()
                .await
                .map_err(map_batch_get_item_error)?;

            if let Some(mut responses) = output.responses {
                for item in responses.remove(table_name).unwrap_or_default() {
                    if let Some(id) = item.get("id").and_then(|v| v.as_s().ok()) {
                        found.insert(id.clone(), item);
                    }
                }
            }

            request_items = output.unprocessed_keys.filter(|keys| !keys.is_empty());
            if request_items.is_some() && attempt == BATCH_GET_MAX_RETRIES {
                tracing::warn!(
                    table = table_name,
                    "BatchGetItem left keys unprocessed after {} retries",
                    BATCH_GET_MAX_RETRIES
                );
            }
        }
    }

    Ok(unique.into_iter().filter_map(|id| found.remove(id)).collect())
}

// ============================================================================
// CategoryRepository implementation
// ============================================================================

#[async_trait]
impl CategoryRepository for DynamoDbCategoryRepository {
    async fn main_categories(&self, limit: usize, offset: usize) -> Result<Vec<Category>> {
        let items = query_index(
            &self.client,
            &self.table_name,
            MAIN_CATEGORY_INDEX,
            "isMainCategory",
            AttributeValue::S(MAIN_CATEGORY_FLAG.to_string()),
            true,
        )
        .await?;

        let categories = items
            .iter()
            .map(item_to_category)
            .collect::<Result<Vec<_>>>()?;
        Ok(paginate(categories, limit, offset))
    }

    async fn sub_categories(&self, parent_id: &str) -> Result<Vec<Category>> {
        let items = query_index(
            &self.client,
            &self.table_name,
            PARENT_CATEGORY_INDEX,
            "parentCategoryId",
            AttributeValue::S(parent_id.to_string()),
            false,
        )
        .await?;

        items.iter().map(item_to_category).collect()
    }

    async fn find(&self, id: &str) -> Result<Option<Category>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(id_key(id)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_category(&item)?)),
            None => Ok(None),
        }
    }

    async fn find_many(&self, ids: &[String]) -> Result<Vec<Category>> {
        let items = batch_get(&self.client, &self.table_name, ids).await?;
        items.iter().map(item_to_category).collect()
    }

    async fn store(&self, category: &Category) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(category_to_item(category)))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| {
                map_put_item_error(e, || RepositoryError::AlreadyExists {
                    entity_type: "Category",
                    id: category.id.clone(),
                })
            })?;

        Ok(())
    }

    async fn update(&self, id: &str, category: &Category) -> Result<()> {
        let mut item = category_to_item(category);
        item.insert("id".to_string(), AttributeValue::S(id.to_string()));

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("id = :id")
            .expression_attribute_values(":id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| {
                map_put_item_error(e, || RepositoryError::NotFound {
                    entity_type: "Category",
                    id: id.to_string(),
                })
            })?;

        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(id_key(id)))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }

    async fn all(&self) -> Result<Vec<Category>> {
        let items = scan_all(&self.client, &self.table_name, Some(ID_NAME_INDEX)).await?;
        items.iter().map(item_to_category).collect()
    }

    async fn total(&self) -> Result<i64> {
        count_all(&self.client, &self.table_name).await
    }
}

// ============================================================================
// ProductRepository implementation
// ============================================================================

#[async_trait]
impl ProductRepository for DynamoDbProductRepository {
    async fn store(&self, product: &Product) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(product_to_item(product)))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| {
                map_put_item_error(e, || RepositoryError::AlreadyExists {
                    entity_type: "Product",
                    id: product.id.clone(),
                })
            })?;

        Ok(())
    }

    async fn update(&self, id: &str, product: &Product) -> Result<()> {
        let mut item = product_to_item(product);
        item.insert("id".to_string(), AttributeValue::S(id.to_string()));

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("id = :id")
            .expression_attribute_values(":id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| {
                map_put_item_error(e, || RepositoryError::NotFound {
                    entity_type: "Product",
                    id: id.to_string(),
                })
            })?;

        Ok(())
    }

    async fn find_one(&self, id: &str) -> Result<Option<Product>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(id_key(id)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_product(&item)?)),
            None => Ok(None),
        }
    }

    async fn find_many(&self, ids: &[String]) -> Result<Vec<Product>> {
        let items = batch_get(&self.client, &self.table_name, ids).await?;
        items.iter().map(item_to_product).collect()
    }

    async fn find_by_category_id(&self, category_id: &str) -> Result<Vec<Product>> {
        let items = query_index(
            &self.client,
            &self.table_name,
            CATEGORY_ID_INDEX,
            "categoryId",
            AttributeValue::S(category_id.to_string()),
            false,
        )
        .await?;

        items.iter().map(item_to_product).collect()
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(id_key(id)))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }

    async fn all(&self) -> Result<Vec<Product>> {
        let items = scan_all(&self.client, &self.table_name, None).await?;
        items.iter().map(item_to_product).collect()
    }
}
