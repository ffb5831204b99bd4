use crate::domain::shared::value_objects::ProductId;

/// Catalog product as seen by the cart. Only its existence matters to cart
/// invariants; name and price are carried for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in minor currency units.
    pub price: i64,
}
