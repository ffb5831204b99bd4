use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::model::CartLine;
use crate::domain::cart_item::repository::CartItemRepository;
use crate::domain::cart_item::use_cases::get_all::{GetCartItemsParams, GetCartItemsUseCase};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;
use crate::domain::user::repository::UserRepository;

pub struct GetCartItemsUseCaseImpl {
    pub repository: Arc<dyn CartItemRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub product_repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartItemsUseCase for GetCartItemsUseCaseImpl {
    async fn execute(&self, params: GetCartItemsParams) -> Result<Vec<CartLine>, CartItemError> {
        self.logger
            .info(&format!("Getting cart items of user {}", params.user_id));

        // An unknown user has an empty cart, not an error.
        match self.user_repository.get_by_id(params.user_id).await {
            Ok(user) => self
                .logger
                .debug(&format!("Resolved user {} ({})", user.id, user.login_id)),
            Err(RepositoryError::NotFound) => {
                self.logger.warn(&format!(
                    "User {} not found, returning empty cart",
                    params.user_id
                ));
                return Ok(Vec::new());
            }
            Err(other) => return Err(CartItemError::Repository(other)),
        }

        let items = self.repository.get_by_user(params.user_id).await?;

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            match self.product_repository.get_by_id(item.product_id).await {
                Ok(product) => lines.push(CartLine { item, product }),
                // Removed from the catalog after the lines were read.
                Err(RepositoryError::NotFound) => self.logger.warn(&format!(
                    "Product {} of cart item {} not found, skipping",
                    item.product_id, item.id
                )),
                Err(other) => return Err(CartItemError::Repository(other)),
            }
        }

        self.logger
            .info(&format!("Retrieved {} cart items", lines.len()));
        Ok(lines)
    }
}
