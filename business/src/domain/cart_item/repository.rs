use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::{ProductId, UserId};

use super::model::CartItem;

/// Durable storage of cart lines.
///
/// Implementations must keep at most one line per (user, product) pair.
/// Both writes are single atomic statements: `insert_or_increment` inserts
/// the line or adds its quantity to the stored one, `update_quantity` only
/// touches a line that still exists.
#[async_trait]
pub trait CartItemRepository: Send + Sync {
    async fn get_by_user(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<CartItem, RepositoryError>;
    async fn find_by_user_and_product(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, RepositoryError>;
    /// Returns the stored line, which keeps its original id when the pair
    /// already had one.
    async fn insert_or_increment(&self, item: &CartItem) -> Result<CartItem, RepositoryError>;
    /// `RepositoryError::NotFound` when the line is gone.
    async fn update_quantity(&self, item: &CartItem) -> Result<CartItem, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn delete_by_user(&self, user_id: UserId) -> Result<u64, RepositoryError>;
    async fn delete_by_product(&self, product_id: ProductId) -> Result<u64, RepositoryError>;
}
