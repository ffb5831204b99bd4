use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::model::CartItem;

pub struct UpdateCartItemQuantityParams {
    pub id: Uuid,
    pub quantity: i32,
}

#[async_trait]
pub trait UpdateCartItemQuantityUseCase: Send + Sync {
    async fn execute(
        &self,
        params: UpdateCartItemQuantityParams,
    ) -> Result<CartItem, CartItemError>;
}
