//! Catalog service - product listing and administration.
//!
//! Role checks happen before these methods are reached; the service itself
//! trusts its caller.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppResult, OptionExt};
use domain::{Product, ProductDraft};

use crate::repository::ProductRepository;

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List all products, newest first
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    /// Get a product, `NotFound` if missing
    async fn get_product(&self, id: i32) -> AppResult<Product>;

    async fn create_product(&self, draft: ProductDraft) -> AppResult<Product>;

    async fn update_product(&self, id: i32, draft: ProductDraft) -> AppResult<Product>;

    async fn delete_product(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of CatalogService using repository.
pub struct CatalogManager {
    repo: Arc<dyn ProductRepository>,
}

impl CatalogManager {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl CatalogService for CatalogManager {
    async fn list_products(&self) -> AppResult<Vec<Product>> {
        self.repo.list().await
    }

    async fn get_product(&self, id: i32) -> AppResult<Product> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_product(&self, draft: ProductDraft) -> AppResult<Product> {
        let product = self.repo.create(draft).await?;
        tracing::info!(product_id = product.id, "Product created");
        Ok(product)
    }

    async fn update_product(&self, id: i32, draft: ProductDraft) -> AppResult<Product> {
        let product = self.repo.update(id, draft).await?;
        tracing::info!(product_id = id, "Product updated");
        Ok(product)
    }

    async fn delete_product(&self, id: i32) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use common::AppError;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Xbox".to_string(),
            description: None,
            price: 299.0,
            stock: 3,
        }
    }

    fn product(id: i32) -> Product {
        Product {
            id,
            name: "Xbox".to_string(),
            description: None,
            price: 299.0,
            stock: 3,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = CatalogManager::new(Arc::new(repo));
        let result = service.get_product(42).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_passes_draft_through() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .withf(|d| d.name == "Xbox" && d.stock == 3)
            .times(1)
            .returning(|_| Ok(product(7)));

        let service = CatalogManager::new(Arc::new(repo));
        let created = service.create_product(draft()).await.unwrap();

        assert_eq!(created.id, 7);
    }

    #[tokio::test]
    async fn test_update_missing_product_propagates_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_update()
            .returning(|_, _| Err(AppError::NotFound));

        let service = CatalogManager::new(Arc::new(repo));
        let result = service.update_product(9, draft()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .returning(|| Err(AppError::internal("connection reset")));

        let service = CatalogManager::new(Arc::new(repo));
        let result = service.list_products().await;

        assert!(matches!(result, Err(e) if e.is_internal()));
    }
}
