use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::product::model::Product;
use crate::domain::shared::value_objects::{ProductId, UserId};

/// Smallest quantity a cart line may hold.
pub const MIN_QUANTITY: i32 = 1;

/// Coerces a requested quantity up to [`MIN_QUANTITY`].
pub fn clamp_quantity(quantity: i32) -> i32 {
    quantity.max(MIN_QUANTITY)
}

/// One (user, product, quantity) line of a shopping cart.
///
/// `user_id` and `product_id` are fixed at creation; only the quantity
/// changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new line holding the clamped quantity as its absolute value.
    pub fn new(user_id: UserId, product_id: ProductId, quantity: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            product_id,
            quantity: clamp_quantity(quantity),
            created_at: now,
            updated_at: now,
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            product_id,
            quantity,
            created_at,
            updated_at,
        }
    }

    /// Replaces the quantity with the clamped value.
    pub fn set_quantity(&mut self, quantity: i32) {
        self.quantity = clamp_quantity(quantity);
        self.updated_at = Utc::now();
    }
}

/// A cart line with the product it refers to, as shown to the cart owner.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Product,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i32) -> CartItem {
        CartItem::new(UserId::new(1), ProductId::new(10), quantity)
    }

    #[test]
    fn should_create_item_with_requested_quantity() {
        let item = item(2);

        assert_eq!(item.user_id, UserId::new(1));
        assert_eq!(item.product_id, ProductId::new(10));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn should_clamp_new_item_quantity_to_one() {
        assert_eq!(item(0).quantity, 1);
        assert_eq!(item(-7).quantity, 1);
    }

    #[test]
    fn should_clamp_when_setting_quantity() {
        let mut item = item(4);

        item.set_quantity(0);
        assert_eq!(item.quantity, 1);

        item.set_quantity(9);
        assert_eq!(item.quantity, 9);
    }
}
