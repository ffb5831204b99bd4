use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::model::CartItem;
use crate::domain::shared::value_objects::{ProductId, UserId};

pub struct AddToCartParams {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
}

#[async_trait]
pub trait AddToCartUseCase: Send + Sync {
    async fn execute(&self, params: AddToCartParams) -> Result<CartItem, CartItemError>;
}
