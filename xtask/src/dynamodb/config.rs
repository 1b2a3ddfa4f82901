//! Table schemas for the catalog (pure data, no I/O).

/// Which catalog table a schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CatalogTable {
    Categories,
    Products,
}

impl CatalogTable {
    /// Both tables, in deployment order.
    pub const ALL: [CatalogTable; 2] = [CatalogTable::Categories, CatalogTable::Products];
}

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub gsis: Vec<GsiConfig>,
}

/// A key attribute definition. Every catalog key is a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
}

impl KeyAttribute {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Global Secondary Index configuration. Projections are always `ALL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsiConfig {
    pub name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
}

impl GsiConfig {
    fn hash(name: &str, partition_key: &str) -> Self {
        Self {
            name: name.to_string(),
            partition_key: KeyAttribute::new(partition_key),
            sort_key: None,
        }
    }

    fn hash_range(name: &str, partition_key: &str, sort_key: &str) -> Self {
        Self {
            sort_key: Some(KeyAttribute::new(sort_key)),
            ..Self::hash(name, partition_key)
        }
    }
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Names of every attribute used as a table or index key, without duplicates.
    pub fn key_attribute_names(&self) -> Vec<&str> {
        let mut names = vec![self.partition_key.name.as_str()];
        for gsi in &self.gsis {
            let keys = std::iter::once(&gsi.partition_key).chain(gsi.sort_key.as_ref());
            for key in keys {
                if !names.contains(&key.name.as_str()) {
                    names.push(key.name.as_str());
                }
            }
        }
        names
    }
}

/// Returns the schema for the given table under its default name.
pub fn table_config(table: CatalogTable) -> TableConfig {
    match table {
        CatalogTable::Categories => categories_table_config(),
        CatalogTable::Products => products_table_config(),
    }
}

/// Categories: main-category flag, parent lookup and the id/name listing index.
pub fn categories_table_config() -> TableConfig {
    TableConfig {
        table_name: "categories".to_string(),
        partition_key: KeyAttribute::new("id"),
        gsis: vec![
            GsiConfig::hash("isMainCategory-index", "isMainCategory"),
            GsiConfig::hash("parentCategoryId-index", "parentCategoryId"),
            GsiConfig::hash_range("id-name-index", "id", "name"),
        ],
    }
}

/// Products: lookup by owning category.
pub fn products_table_config() -> TableConfig {
    TableConfig {
        table_name: "products".to_string(),
        partition_key: KeyAttribute::new("id"),
        gsis: vec![GsiConfig::hash("categoryId-index", "categoryId")],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_indexes() {
        let config = categories_table_config();
        let names: Vec<&str> = config.gsis.iter().map(|g| g.name.as_str()).collect();

        assert_eq!(config.partition_key.name, "id");
        assert_eq!(
            names,
            vec!["isMainCategory-index", "parentCategoryId-index", "id-name-index"]
        );
        assert_eq!(
            config.gsis[2].sort_key,
            Some(KeyAttribute::new("name"))
        );
    }

    #[test]
    fn test_key_attribute_names_are_deduplicated() {
        let config = categories_table_config();

        assert_eq!(
            config.key_attribute_names(),
            vec!["id", "isMainCategory", "parentCategoryId", "name"]
        );
        assert_eq!(
            products_table_config().key_attribute_names(),
            vec!["id", "categoryId"]
        );
    }

    #[test]
    fn test_with_table_name() {
        let config = table_config(CatalogTable::Products).with_table_name("products-dev");

        assert_eq!(config.table_name, "products-dev");
        assert_eq!(config.gsis.len(), 1);
    }
}
