//! Product repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use common::{AppError, AppResult};
use domain::{Product, ProductDraft};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List all products, newest id first
    async fn list(&self) -> AppResult<Vec<Product>>;

    /// Find product by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    /// Insert a product; the id is assigned by the store
    async fn create(&self, draft: ProductDraft) -> AppResult<Product>;

    /// Replace every editable field of an existing product
    async fn update(&self, id: i32, draft: ProductDraft) -> AppResult<Product>;

    /// Delete by ID. Deleting a missing product is not an error.
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn list(&self) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .order_by_desc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn create(&self, draft: ProductDraft) -> AppResult<Product> {
        let active_model = ActiveModel {
            name: Set(draft.name),
            description: Set(draft.description),
            price: Set(draft.price),
            stock: Set(draft.stock),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Product::from(model))
    }

    async fn update(&self, id: i32, draft: ProductDraft) -> AppResult<Product> {
        let existing = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.description = Set(draft.description);
        active.price = Set(draft.price);
        active.stock = Set(draft.stock);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Product::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = ProductEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            tracing::debug!(product_id = id, "Delete of missing product ignored");
        }

        Ok(())
    }
}
