use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::cart_item::model::CartItem;
use business::domain::cart_item::repository::CartItemRepository;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::{ProductId, UserId};

use super::entity::CartItemEntity;
use crate::db::database_error;

pub struct CartItemRepositoryPostgres {
    pool: PgPool,
}

impl CartItemRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartItemRepository for CartItemRepositoryPostgres {
    async fn get_by_user(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let entities = sqlx::query_as::<_, CartItemEntity>(
            "SELECT id, user_id, product_id, quantity, created_at, updated_at FROM cart_items WHERE user_id = $1 ORDER BY created_at, id",
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<CartItem, RepositoryError> {
        let entity = sqlx::query_as::<_, CartItemEntity>(
            "SELECT id, user_id, product_id, quantity, created_at, updated_at FROM cart_items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn find_by_user_and_product(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let entity = sqlx::query_as::<_, CartItemEntity>(
            "SELECT id, user_id, product_id, quantity, created_at, updated_at FROM cart_items WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id.value())
        .bind(product_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(entity.map(|e| e.into_domain()))
    }

    async fn insert_or_increment(&self, item: &CartItem) -> Result<CartItem, RepositoryError> {
        // The increment is applied to the stored row, so concurrent adds of
        // the same product all count.
        let entity = sqlx::query_as::<_, CartItemEntity>(
            r#"INSERT INTO cart_items (id, user_id, product_id, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, product_id) DO UPDATE SET
                quantity = LEAST(cart_items.quantity::BIGINT + EXCLUDED.quantity, 2147483647)::INTEGER,
                updated_at = EXCLUDED.updated_at
            RETURNING id, user_id, product_id, quantity, created_at, updated_at"#,
        )
        .bind(item.id)
        .bind(item.user_id.value())
        .bind(item.product_id.value())
        .bind(item.quantity)
        .bind(item.created_at)
        .bind(item.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(entity.into_domain())
    }

    async fn update_quantity(&self, item: &CartItem) -> Result<CartItem, RepositoryError> {
        let entity = sqlx::query_as::<_, CartItemEntity>(
            r#"UPDATE cart_items SET quantity = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, user_id, product_id, quantity, created_at, updated_at"#,
        )
        .bind(item.id)
        .bind(item.quantity)
        .bind(item.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(())
    }

    async fn delete_by_user(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id.value())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_by_product(&self, product_id: ProductId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE product_id = $1")
            .bind(product_id.value())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected())
    }
}
