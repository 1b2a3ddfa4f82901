//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use catalog_core::catalog::{Category, MultimediaItem, Product, UnitOfMeasurement};
use catalog_core::storage::RepositoryError;
use chrono::{DateTime, Utc};

/// Value of `isMainCategory` for categories without a parent.
pub const MAIN_CATEGORY_FLAG: &str = "y";
/// Value of `isMainCategory` for sub categories.
pub const SUB_CATEGORY_FLAG: &str = "n";

// ============================================================================
// Key helpers
// ============================================================================

/// Builds the primary key map for an item ID.
pub fn id_key(id: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([("id".to_string(), AttributeValue::S(id.to_string()))])
}

// ============================================================================
// Category conversions
// ============================================================================

/// Convert a Category to DynamoDB item.
///
/// `parentCategoryId` is omitted for main categories so they stay out of the
/// parent index.
pub fn category_to_item(category: &Category) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    item.insert("id".to_string(), AttributeValue::S(category.id.clone()));
    item.insert("name".to_string(), AttributeValue::S(category.name.clone()));
    if let Some(desc) = &category.description {
        item.insert("description".to_string(), AttributeValue::S(desc.clone()));
    }
    item.insert(
        "multimedia".to_string(),
        multimedia_to_attribute(&category.multimedia),
    );
    if let Some(parent) = category.parent_category_id.as_deref().filter(|p| !p.is_empty()) {
        item.insert(
            "parentCategoryId".to_string(),
            AttributeValue::S(parent.to_string()),
        );
    }
    let flag = if category.is_main_category {
        MAIN_CATEGORY_FLAG
    } else {
        SUB_CATEGORY_FLAG
    };
    item.insert(
        "isMainCategory".to_string(),
        AttributeValue::S(flag.to_string()),
    );
    item.insert("visible".to_string(), AttributeValue::Bool(category.visible));
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(category.created_at.to_rfc3339()),
    );

    item
}

/// Convert a DynamoDB item to Category.
pub fn item_to_category(
    item: &HashMap<String, AttributeValue>,
) -> Result<Category, RepositoryError> {
    let parent_category_id = get_optional_string(item, "parentCategoryId").filter(|p| !p.is_empty());
    let is_main_category = match get_optional_string(item, "isMainCategory").as_deref() {
        Some(MAIN_CATEGORY_FLAG) => true,
        Some(SUB_CATEGORY_FLAG) => false,
        Some(other) => {
            return Err(RepositoryError::InvalidData(format!(
                "Invalid isMainCategory flag: {}",
                other
            )))
        }
        None => parent_category_id.is_none(),
    };

    Ok(Category {
        id: get_string(item, "id")?,
        name: get_string(item, "name")?,
        description: get_optional_string(item, "description"),
        multimedia: get_multimedia(item, "multimedia")?,
        parent_category_id,
        is_main_category,
        visible: get_optional_bool(item, "visible").unwrap_or(false),
        created_at: get_datetime(item, "createdAt")?,
    })
}

// ============================================================================
// Product conversions
// ============================================================================

/// Convert a Product to DynamoDB item.
pub fn product_to_item(product: &Product) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    item.insert("id".to_string(), AttributeValue::S(product.id.clone()));
    item.insert("name".to_string(), AttributeValue::S(product.name.clone()));
    item.insert("price".to_string(), AttributeValue::N(product.price.to_string()));
    if let Some(desc) = &product.description {
        item.insert("description".to_string(), AttributeValue::S(desc.clone()));
    }
    item.insert(
        "categoryId".to_string(),
        AttributeValue::S(product.category_id.clone()),
    );
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(product.created_at.to_rfc3339()),
    );
    item.insert(
        "multimedia".to_string(),
        multimedia_to_attribute(&product.multimedia),
    );
    if let Some(unit) = &product.unit_of_measurement {
        item.insert(
            "unitOfMeasurement".to_string(),
            AttributeValue::M(HashMap::from([
                (
                    "quantity".to_string(),
                    AttributeValue::N(unit.quantity.to_string()),
                ),
                ("unit".to_string(), AttributeValue::S(unit.unit.clone())),
            ])),
        );
    }

    item
}

/// Convert a DynamoDB item to Product.
pub fn item_to_product(item: &HashMap<String, AttributeValue>) -> Result<Product, RepositoryError> {
    let unit_of_measurement = match item.get("unitOfMeasurement") {
        Some(value) => {
            let map = value.as_m().map_err(|_| {
                RepositoryError::InvalidData("Missing or invalid field: unitOfMeasurement".to_string())
            })?;
            Some(UnitOfMeasurement {
                quantity: get_number(map, "quantity")?,
                unit: get_string(map, "unit")?,
            })
        }
        None => None,
    };

    Ok(Product {
        id: get_string(item, "id")?,
        name: get_string(item, "name")?,
        price: get_number(item, "price")?,
        description: get_optional_string(item, "description"),
        category_id: get_string(item, "categoryId")?,
        created_at: get_datetime(item, "createdAt")?,
        multimedia: get_multimedia(item, "multimedia")?,
        unit_of_measurement,
    })
}

// ============================================================================
// Multimedia conversions
// ============================================================================

fn multimedia_to_attribute(items: &[MultimediaItem]) -> AttributeValue {
    AttributeValue::L(
        items
            .iter()
            .map(|media| {
                let mut map = HashMap::from([
                    ("id".to_string(), AttributeValue::S(media.id.clone())),
                    ("url".to_string(), AttributeValue::S(media.url.clone())),
                ]);
                if let Some(kind) = &media.kind {
                    map.insert("kind".to_string(), AttributeValue::S(kind.clone()));
                }
                AttributeValue::M(map)
            })
            .collect(),
    )
}

/// Get an optional list of multimedia items. A missing attribute is an empty list.
fn get_multimedia(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Vec<MultimediaItem>, RepositoryError> {
    let Some(value) = item.get(key) else {
        return Ok(Vec::new());
    };
    let list = value
        .as_l()
        .map_err(|_| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))?;

    list.iter()
        .map(|entry| {
            let map = entry.as_m().map_err(|_| {
                RepositoryError::InvalidData(format!("Invalid multimedia item in {}", key))
            })?;
            Ok(MultimediaItem {
                id: get_string(map, "id")?,
                url: get_string(map, "url")?,
                kind: get_optional_string(map, "kind"),
            })
        })
        .collect()
}

// ============================================================================
// Attribute helpers
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get an optional boolean attribute.
fn get_optional_bool(item: &HashMap<String, AttributeValue>, key: &str) -> Option<bool> {
    item.get(key).and_then(|v| v.as_bool().ok()).copied()
}

/// Get a required numeric attribute.
fn get_number(item: &HashMap<String, AttributeValue>, key: &str) -> Result<f64, RepositoryError> {
    let n = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))?;
    n.parse()
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid number {}: {}", key, e)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}
