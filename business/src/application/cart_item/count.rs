use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::repository::CartItemRepository;
use crate::domain::cart_item::use_cases::count::{CountCartItemsParams, CountCartItemsUseCase};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::UserId;
use crate::domain::user::repository::UserRepository;

pub struct CountCartItemsUseCaseImpl {
    pub repository: Arc<dyn CartItemRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub logger: Arc<dyn Logger>,
}

impl CountCartItemsUseCaseImpl {
    async fn count(&self, user_id: UserId) -> Result<u64, CartItemError> {
        match self.user_repository.get_by_id(user_id).await {
            Ok(_) => {}
            Err(RepositoryError::NotFound) => return Ok(0),
            Err(other) => return Err(other.into()),
        }

        let items = self.repository.get_by_user(user_id).await?;
        Ok(items.len() as u64)
    }
}

#[async_trait]
impl CountCartItemsUseCase for CountCartItemsUseCaseImpl {
    async fn execute(&self, params: CountCartItemsParams) -> u64 {
        // Feeds a UI badge: failures report zero instead of surfacing.
        self.count(params.user_id).await.unwrap_or_else(|e| {
            self.logger.error(&format!(
                "Counting cart items of user {} failed: {}",
                params.user_id, e
            ));
            0
        })
    }
}
