use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::ProductId;

use super::model::Product;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_by_id(&self, id: ProductId) -> Result<Product, RepositoryError>;
}
