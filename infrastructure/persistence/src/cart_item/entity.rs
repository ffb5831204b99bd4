use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::cart_item::model::CartItem;
use business::domain::shared::value_objects::{ProductId, UserId};

#[derive(Debug, FromRow)]
pub struct CartItemEntity {
    pub id: Uuid,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartItemEntity {
    pub fn into_domain(self) -> CartItem {
        CartItem::from_repository(
            self.id,
            UserId::new(self.user_id),
            ProductId::new(self.product_id),
            self.quantity,
            self.created_at,
            self.updated_at,
        )
    }
}
