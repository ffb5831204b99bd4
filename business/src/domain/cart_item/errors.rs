#[derive(Debug, thiserror::Error)]
pub enum CartItemError {
    #[error("cart_item.user_not_found")]
    UserNotFound,
    #[error("cart_item.product_not_found")]
    ProductNotFound,
    #[error("cart_item.not_found")]
    NotFound,
    #[error("cart_item.invalid_quantity")]
    InvalidQuantity,
    #[error("cart_item.invalid_product_id")]
    InvalidProductId,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
