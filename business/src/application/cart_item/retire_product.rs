use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::repository::CartItemRepository;
use crate::domain::cart_item::use_cases::retire_product::{
    RetireProductParams, RetireProductUseCase,
};
use crate::domain::logger::Logger;

pub struct RetireProductUseCaseImpl {
    pub repository: Arc<dyn CartItemRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RetireProductUseCase for RetireProductUseCaseImpl {
    async fn execute(&self, params: RetireProductParams) -> Result<u64, CartItemError> {
        self.logger.info(&format!(
            "Removing product {} from all carts",
            params.product_id
        ));

        let count = self
            .repository
            .delete_by_product(params.product_id)
            .await?;

        self.logger.info(&format!(
            "Product {} removed from {} cart lines",
            params.product_id, count
        ));
        Ok(count)
    }
}
