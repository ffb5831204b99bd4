use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::model::CartItem;
use crate::domain::cart_item::repository::CartItemRepository;
use crate::domain::cart_item::use_cases::update_quantity::{
    UpdateCartItemQuantityParams, UpdateCartItemQuantityUseCase,
};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;

/// Sets the quantity of a line. The caller is responsible for checking that
/// the line belongs to the requesting user.
pub struct UpdateCartItemQuantityUseCaseImpl {
    pub repository: Arc<dyn CartItemRepository>,
    pub logger: Arc<dyn Logger>,
}

fn not_found(error: RepositoryError) -> CartItemError {
    match error {
        RepositoryError::NotFound => CartItemError::NotFound,
        other => CartItemError::Repository(other),
    }
}

#[async_trait]
impl UpdateCartItemQuantityUseCase for UpdateCartItemQuantityUseCaseImpl {
    async fn execute(
        &self,
        params: UpdateCartItemQuantityParams,
    ) -> Result<CartItem, CartItemError> {
        self.logger.info(&format!(
            "Updating quantity of cart item {} to {}",
            params.id, params.quantity
        ));

        let mut item = self
            .repository
            .get_by_id(params.id)
            .await
            .map_err(not_found)?;

        item.set_quantity(params.quantity);
        // A line removed since the read stays removed.
        let saved = self
            .repository
            .update_quantity(&item)
            .await
            .map_err(not_found)?;

        self.logger.info(&format!(
            "Cart item {} quantity updated to {}",
            saved.id, saved.quantity
        ));
        Ok(saved)
    }
}
