//! Request types for creating catalog entities.
//!
//! Pure data types with no I/O. Services validate the entity they produce
//! before storing it.

use serde::{Deserialize, Serialize};

use super::types::{Category, MultimediaItem, Product, UnitOfMeasurement};

/// Request payload for creating a new category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_category_id: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub multimedia: Vec<MultimediaItem>,
}

fn default_visible() -> bool {
    true
}

impl CreateCategoryRequest {
    /// Create a new request for a visible main category.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parent_category_id: None,
            visible: true,
            multimedia: Vec::new(),
        }
    }

    /// Set the category description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the parent category.
    pub fn with_parent(mut self, parent_category_id: impl Into<String>) -> Self {
        self.parent_category_id = Some(parent_category_id.into());
        self
    }

    /// Set the visibility flag.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the multimedia items.
    pub fn with_multimedia(mut self, multimedia: Vec<MultimediaItem>) -> Self {
        self.multimedia = multimedia;
        self
    }

    /// Convert into a Category with a fresh ID and creation time.
    pub fn into_category(self) -> Category {
        let mut category = Category::new(self.name)
            .with_visible(self.visible)
            .with_multimedia(self.multimedia);
        if let Some(description) = self.description {
            category = category.with_description(description);
        }
        if let Some(parent) = self.parent_category_id {
            category = category.with_parent(parent);
        }
        category
    }
}

/// Request payload for creating a new product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub category_id: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_of_measurement: Option<UnitOfMeasurement>,
    #[serde(default)]
    pub multimedia: Vec<MultimediaItem>,
}

impl CreateProductRequest {
    /// Create a new request with the required fields.
    pub fn new(name: impl Into<String>, category_id: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            category_id: category_id.into(),
            price,
            description: None,
            unit_of_measurement: None,
            multimedia: Vec::new(),
        }
    }

    /// Set the product description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the unit of measurement.
    pub fn with_unit_of_measurement(mut self, unit: UnitOfMeasurement) -> Self {
        self.unit_of_measurement = Some(unit);
        self
    }

    /// Set the multimedia items.
    pub fn with_multimedia(mut self, multimedia: Vec<MultimediaItem>) -> Self {
        self.multimedia = multimedia;
        self
    }

    /// Convert into a Product with a fresh ID and creation time.
    pub fn into_product(self) -> Product {
        let mut product =
            Product::new(self.name, self.category_id, self.price).with_multimedia(self.multimedia);
        if let Some(description) = self.description {
            product = product.with_description(description);
        }
        if let Some(unit) = self.unit_of_measurement {
            product = product.with_unit_of_measurement(unit);
        }
        product
    }
}
