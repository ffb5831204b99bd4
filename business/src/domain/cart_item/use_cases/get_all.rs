use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::model::CartLine;
use crate::domain::shared::value_objects::UserId;

pub struct GetCartItemsParams {
    pub user_id: UserId,
}

#[async_trait]
pub trait GetCartItemsUseCase: Send + Sync {
    async fn execute(&self, params: GetCartItemsParams) -> Result<Vec<CartLine>, CartItemError>;
}
