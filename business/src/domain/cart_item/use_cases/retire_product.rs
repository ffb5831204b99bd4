use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::shared::value_objects::ProductId;

pub struct RetireProductParams {
    pub product_id: ProductId,
}

/// Removes a product from every cart, e.g. when it leaves the catalog.
#[async_trait]
pub trait RetireProductUseCase: Send + Sync {
    async fn execute(&self, params: RetireProductParams) -> Result<u64, CartItemError>;
}
