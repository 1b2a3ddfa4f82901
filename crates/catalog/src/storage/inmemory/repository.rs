//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use catalog_core::catalog::{paginate, Category, Product};
use catalog_core::storage::{CategoryRepository, ProductRepository, RepositoryError, Result};

/// In-memory storage backend.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
/// Listings are ordered by creation time, then ID.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    categories: Arc<RwLock<HashMap<String, Category>>>,
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            categories: Arc::new(RwLock::new(HashMap::new())),
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn sorted_categories<P>(&self, predicate: P) -> Vec<Category>
    where
        P: Fn(&Category) -> bool,
    {
        let categories = self.categories.read().await;
        let mut matching: Vec<Category> = categories
            .values()
            .filter(|c| predicate(c))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        matching
    }

    async fn sorted_products<P>(&self, predicate: P) -> Vec<Product>
    where
        P: Fn(&Product) -> bool,
    {
        let products = self.products.read().await;
        let mut matching: Vec<Product> = products
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        matching
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn main_categories(&self, limit: usize, offset: usize) -> Result<Vec<Category>> {
        let main = self
            .sorted_categories(|c| c.is_main_category && c.visible)
            .await;
        Ok(paginate(main, limit, offset))
    }

    async fn sub_categories(&self, parent_id: &str) -> Result<Vec<Category>> {
        Ok(self
            .sorted_categories(|c| c.parent_category_id.as_deref() == Some(parent_id))
            .await)
    }

    async fn find(&self, id: &str) -> Result<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(id).cloned())
    }

    async fn find_many(&self, ids: &[String]) -> Result<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(ids.iter().filter_map(|id| categories.get(id).cloned()).collect())
    }

    async fn store(&self, category: &Category) -> Result<()> {
        let mut categories = self.categories.write().await;
        if categories.contains_key(&category.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Category",
                id: category.id.clone(),
            });
        }
        categories.insert(category.id.clone(), category.clone());
        Ok(())
    }

    async fn update(&self, id: &str, category: &Category) -> Result<()> {
        let mut categories = self.categories.write().await;
        if !categories.contains_key(id) {
            return Err(RepositoryError::NotFound {
                entity_type: "Category",
                id: id.to_string(),
            });
        }
        let mut updated = category.clone();
        updated.id = id.to_string();
        categories.insert(id.to_string(), updated);
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.categories.write().await.remove(id);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Category>> {
        Ok(self.sorted_categories(|_| true).await)
    }

    async fn total(&self) -> Result<i64> {
        Ok(self.categories.read().await.len() as i64)
    }
}

#[async_trait]
impl ProductRepository for InMemoryRepository {
    async fn store(&self, product: &Product) -> Result<()> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Product",
                id: product.id.clone(),
            });
        }
        products.insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn update(&self, id: &str, product: &Product) -> Result<()> {
        let mut products = self.products.write().await;
        if !products.contains_key(id) {
            return Err(RepositoryError::NotFound {
                entity_type: "Product",
                id: id.to_string(),
            });
        }
        let mut updated = product.clone();
        updated.id = id.to_string();
        products.insert(id.to_string(), updated);
        Ok(())
    }

    async fn find_one(&self, id: &str) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(id).cloned())
    }

    async fn find_many(&self, ids: &[String]) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }

    async fn find_by_category_id(&self, category_id: &str) -> Result<Vec<Product>> {
        Ok(self
            .sorted_products(|p| p.category_id == category_id)
            .await)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.products.write().await.remove(id);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Product>> {
        Ok(self.sorted_products(|_| true).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use catalog_core::storage::MAX_PARENT_HOPS;

    fn category_at(id: &str, minutes: i64) -> Category {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Category::new(format!("Category {id}"))
            .with_id(id)
            .with_created_at(base + Duration::minutes(minutes))
    }

    #[tokio::test]
    async fn test_store_and_find_category() {
        let repo = InMemoryRepository::new();
        let category = category_at("abcd", 0);

        CategoryRepository::store(&repo, &category).await.unwrap();

        assert_eq!(repo.find("abcd").await.unwrap(), Some(category));
        assert_eq!(repo.find("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_duplicate_category_fails() {
        let repo = InMemoryRepository::new();
        let category = category_at("abcd", 0);
        CategoryRepository::store(&repo, &category).await.unwrap();

        let result = CategoryRepository::store(&repo, &category).await;

        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists { entity_type: "Category", .. })
        ));
    }

    #[tokio::test]
    async fn test_update_missing_category_fails() {
        let repo = InMemoryRepository::new();

        let result = CategoryRepository::update(&repo, "abcd", &category_at("abcd", 0)).await;

        assert!(matches!(
            result,
            Err(RepositoryError::NotFound { entity_type: "Category", .. })
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_category_under_given_id() {
        let repo = InMemoryRepository::new();
        CategoryRepository::store(&repo, &category_at("abcd", 0))
            .await
            .unwrap();

        let replacement = category_at("other", 5).with_description("Renamed");
        CategoryRepository::update(&repo, "abcd", &replacement)
            .await
            .unwrap();

        let found = repo.find("abcd").await.unwrap().unwrap();
        assert_eq!(found.id, "abcd");
        assert_eq!(found.description.as_deref(), Some("Renamed"));
        assert_eq!(repo.total().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let repo = InMemoryRepository::new();
        CategoryRepository::store(&repo, &category_at("abcd", 0))
            .await
            .unwrap();

        repo.remove("abcd").await.unwrap();
        repo.remove("abcd").await.unwrap();

        assert_eq!(repo.total().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_main_categories_paginates_visible_roots_in_creation_order() {
        let repo = InMemoryRepository::new();
        for i in 0..5 {
            CategoryRepository::store(&repo, &category_at(&format!("root-{i}"), 10 - i))
                .await
                .unwrap();
        }
        CategoryRepository::store(&repo, &category_at("hidden", 0).with_visible(false))
            .await
            .unwrap();
        CategoryRepository::store(&repo, &category_at("child", 0).with_parent("root-0"))
            .await
            .unwrap();

        let first = repo.main_categories(2, 0).await.unwrap();
        let last = repo.main_categories(2, 4).await.unwrap();
        let past_end = repo.main_categories(2, 10).await.unwrap();

        let first_ids: Vec<_> = first.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(first_ids, vec!["root-4", "root-3"]);
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].id, "root-0");
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_sub_categories() {
        let repo = InMemoryRepository::new();
        CategoryRepository::store(&repo, &category_at("root", 0))
            .await
            .unwrap();
        CategoryRepository::store(&repo, &category_at("a", 1).with_parent("root"))
            .await
            .unwrap();
        CategoryRepository::store(&repo, &category_at("b", 2).with_parent("root"))
            .await
            .unwrap();
        CategoryRepository::store(&repo, &category_at("c", 3).with_parent("a"))
            .await
            .unwrap();

        let children = repo.sub_categories("root").await.unwrap();

        let ids: Vec<_> = children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_find_many_skips_missing_ids() {
        let repo = InMemoryRepository::new();
        CategoryRepository::store(&repo, &category_at("a", 0))
            .await
            .unwrap();
        CategoryRepository::store(&repo, &category_at("b", 1))
            .await
            .unwrap();

        let ids = vec!["b".to_string(), "missing".to_string(), "a".to_string()];
        let found = CategoryRepository::find_many(&repo, &ids).await.unwrap();

        let found_ids: Vec<_> = found.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(found_ids, vec!["b", "a"]);
        assert!(CategoryRepository::find_many(&repo, &[])
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_find_main_category_walks_parents() {
        let repo = InMemoryRepository::new();
        CategoryRepository::store(&repo, &category_at("root", 0))
            .await
            .unwrap();
        CategoryRepository::store(&repo, &category_at("mid", 1).with_parent("root"))
            .await
            .unwrap();
        CategoryRepository::store(&repo, &category_at("leaf", 2).with_parent("mid"))
            .await
            .unwrap();

        assert_eq!(repo.find_main_category("leaf").await.unwrap().id, "root");
        assert_eq!(repo.find_main_category("root").await.unwrap().id, "root");
    }

    #[tokio::test]
    async fn test_find_main_category_with_missing_parent() {
        let repo = InMemoryRepository::new();
        CategoryRepository::store(&repo, &category_at("orphan", 0).with_parent("gone"))
            .await
            .unwrap();

        let result = repo.find_main_category("orphan").await;

        assert_eq!(
            result,
            Err(RepositoryError::NotFound {
                entity_type: "Category",
                id: "gone".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_find_main_category_gives_up_on_deep_chains() {
        let repo = InMemoryRepository::new();
        // A cycle never reaches a root.
        CategoryRepository::store(&repo, &category_at("a", 0).with_parent("b"))
            .await
            .unwrap();
        CategoryRepository::store(&repo, &category_at("b", 1).with_parent("a"))
            .await
            .unwrap();

        let result = repo.find_main_category("a").await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_find_main_category_accepts_max_depth() {
        let repo = InMemoryRepository::new();
        CategoryRepository::store(&repo, &category_at("level-0", 0))
            .await
            .unwrap();
        for level in 1..=MAX_PARENT_HOPS {
            let category = category_at(&format!("level-{level}"), level as i64)
                .with_parent(format!("level-{}", level - 1));
            CategoryRepository::store(&repo, &category).await.unwrap();
        }

        let root = repo
            .find_main_category(&format!("level-{MAX_PARENT_HOPS}"))
            .await
            .unwrap();

        assert_eq!(root.id, "level-0");
    }

    #[tokio::test]
    async fn test_product_crud() {
        let repo = InMemoryRepository::new();
        let product = Product::new("Cola", "sodas", 1.5).with_id("p1");

        ProductRepository::store(&repo, &product).await.unwrap();
        assert_eq!(repo.find_one("p1").await.unwrap(), Some(product.clone()));

        let repriced = Product::new("Cola", "sodas", 2.0);
        ProductRepository::update(&repo, "p1", &repriced)
            .await
            .unwrap();
        let found = repo.find_one("p1").await.unwrap().unwrap();
        assert_eq!(found.id, "p1");
        assert_eq!(found.price, 2.0);

        repo.delete("p1").await.unwrap();
        repo.delete("p1").await.unwrap();
        assert_eq!(repo.find_one("p1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_product_fails() {
        let repo = InMemoryRepository::new();

        let result =
            ProductRepository::update(&repo, "p1", &Product::new("Cola", "sodas", 1.5)).await;

        assert!(matches!(
            result,
            Err(RepositoryError::NotFound { entity_type: "Product", .. })
        ));
    }

    #[tokio::test]
    async fn test_products_by_category() {
        let repo = InMemoryRepository::new();
        ProductRepository::store(&repo, &Product::new("Cola", "sodas", 1.5))
            .await
            .unwrap();
        ProductRepository::store(&repo, &Product::new("Lemonade", "sodas", 1.0))
            .await
            .unwrap();
        ProductRepository::store(&repo, &Product::new("Chips", "snacks", 2.0))
            .await
            .unwrap();

        assert_eq!(repo.find_by_category_id("sodas").await.unwrap().len(), 2);
        assert_eq!(repo.find_by_category_id("drinks").await.unwrap().len(), 0);
        assert_eq!(ProductRepository::all(&repo).await.unwrap().len(), 3);
    }
}
