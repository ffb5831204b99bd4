use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::model::CartItem;
use crate::domain::cart_item::repository::CartItemRepository;
use crate::domain::cart_item::use_cases::add::{AddToCartParams, AddToCartUseCase};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;
use crate::domain::user::repository::UserRepository;

pub struct AddToCartUseCaseImpl {
    pub repository: Arc<dyn CartItemRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub product_repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddToCartUseCase for AddToCartUseCaseImpl {
    async fn execute(&self, params: AddToCartParams) -> Result<CartItem, CartItemError> {
        self.logger.info(&format!(
            "Adding product {} (qty {}) to cart of user {}",
            params.product_id, params.quantity, params.user_id
        ));

        self.user_repository
            .get_by_id(params.user_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CartItemError::UserNotFound,
                other => CartItemError::Repository(other),
            })?;

        self.product_repository
            .get_by_id(params.product_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CartItemError::ProductNotFound,
                other => CartItemError::Repository(other),
            })?;

        let item = CartItem::new(params.user_id, params.product_id, params.quantity);
        let saved = self.repository.insert_or_increment(&item).await?;

        if saved.id == item.id {
            self.logger
                .info(&format!("Cart item created: {} (qty {})", saved.id, saved.quantity));
        } else {
            self.logger.info(&format!(
                "Cart item {} already present, quantity now {}",
                saved.id, saved.quantity
            ));
        }
        Ok(saved)
    }
}
