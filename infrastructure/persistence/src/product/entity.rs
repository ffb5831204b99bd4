use sqlx::FromRow;

use business::domain::product::model::Product;
use business::domain::shared::value_objects::ProductId;

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: i64,
    pub name: String,
    pub price: i64,
}

impl ProductEntity {
    pub fn into_domain(self) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name,
            price: self.price,
        }
    }
}
