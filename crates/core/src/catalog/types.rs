use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A media asset (image, video, document) attached to a category or product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultimediaItem {
    pub id: String,
    pub url: String,
    /// Free-form media kind, e.g. `"image"` or `"video"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl MultimediaItem {
    /// Creates a new multimedia item with a generated ID.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.into(),
            kind: None,
        }
    }

    /// Sets the media kind.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets a specific ID for this item (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// A product category. Categories without a parent are main categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub multimedia: Vec<MultimediaItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_category_id: Option<String>,
    pub is_main_category: bool,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new visible main category with a generated ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            multimedia: Vec::new(),
            parent_category_id: None,
            is_main_category: true,
            visible: true,
            created_at: Utc::now(),
        }
    }

    /// Sets the parent category.
    ///
    /// An empty parent ID is treated as no parent, keeping the category a
    /// main category.
    pub fn with_parent(mut self, parent_category_id: impl Into<String>) -> Self {
        let parent = parent_category_id.into();
        if parent.is_empty() {
            self.parent_category_id = None;
            self.is_main_category = true;
        } else {
            self.parent_category_id = Some(parent);
            self.is_main_category = false;
        }
        self
    }

    /// Sets the description for this category.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the visibility flag.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Replaces the multimedia items.
    pub fn with_multimedia(mut self, multimedia: Vec<MultimediaItem>) -> Self {
        self.multimedia = multimedia;
        self
    }

    /// Sets a specific ID for this category (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the creation timestamp (useful for testing).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Appends a multimedia item.
    pub fn add_multimedia_item(&mut self, item: MultimediaItem) {
        self.multimedia.push(item);
    }

    /// Removes the multimedia item with the given ID.
    ///
    /// Returns `true` if an item was removed.
    pub fn remove_multimedia_item(&mut self, id: &str) -> bool {
        let before = self.multimedia.len();
        self.multimedia.retain(|item| item.id != id);
        self.multimedia.len() != before
    }
}

/// The quantity and unit a product is sold in (e.g. 500 g).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitOfMeasurement {
    pub quantity: f64,
    pub unit: String,
}

impl UnitOfMeasurement {
    pub fn new(quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            quantity,
            unit: unit.into(),
        }
    }
}

/// A product listed under a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub multimedia: Vec<MultimediaItem>,
    pub unit_of_measurement: Option<UnitOfMeasurement>,
}

impl Product {
    /// Creates a new product with a generated ID.
    pub fn new(name: impl Into<String>, category_id: impl Into<String>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            price,
            description: None,
            category_id: category_id.into(),
            created_at: Utc::now(),
            multimedia: Vec::new(),
            unit_of_measurement: None,
        }
    }

    /// Sets the description for this product.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the unit of measurement.
    pub fn with_unit_of_measurement(mut self, unit: UnitOfMeasurement) -> Self {
        self.unit_of_measurement = Some(unit);
        self
    }

    /// Replaces the multimedia items.
    pub fn with_multimedia(mut self, multimedia: Vec<MultimediaItem>) -> Self {
        self.multimedia = multimedia;
        self
    }

    /// Sets a specific ID for this product (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the creation timestamp (useful for testing).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}
