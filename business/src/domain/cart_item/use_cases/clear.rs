use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::shared::value_objects::UserId;

pub struct ClearCartParams {
    pub user_id: UserId,
}

#[async_trait]
pub trait ClearCartUseCase: Send + Sync {
    async fn execute(&self, params: ClearCartParams) -> Result<u64, CartItemError>;
}
