use async_trait::async_trait;

use crate::domain::shared::value_objects::UserId;

pub struct CountCartItemsParams {
    pub user_id: UserId,
}

/// Counts the lines in a user's cart. Never fails: any error counts as zero.
#[async_trait]
pub trait CountCartItemsUseCase: Send + Sync {
    async fn execute(&self, params: CountCartItemsParams) -> u64;
}
