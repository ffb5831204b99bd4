use chrono::{DateTime, Utc};
use poem_openapi::Object;
use uuid::Uuid;

use business::domain::cart_item::errors::CartItemError;
use business::domain::cart_item::model::{CartItem, CartLine};
use business::domain::product::model::Product;
use business::domain::cart_item::use_cases::add::AddToCartParams;
use business::domain::cart_item::use_cases::update_quantity::UpdateCartItemQuantityParams;
use business::domain::shared::value_objects::{ProductId, UserId};

#[derive(Debug, Clone, Object)]
pub struct AddToCartRequest {
    /// Product to add (must be a positive id)
    pub product_id: Option<i64>,
    /// Units to add (must be at least 1)
    pub quantity: i32,
}

impl AddToCartRequest {
    pub fn validate(self, user_id: UserId) -> Result<AddToCartParams, CartItemError> {
        let product_id = self
            .product_id
            .and_then(ProductId::parse)
            .ok_or(CartItemError::InvalidProductId)?;
        if self.quantity <= 0 {
            return Err(CartItemError::InvalidQuantity);
        }

        Ok(AddToCartParams {
            user_id,
            product_id,
            quantity: self.quantity,
        })
    }
}

#[derive(Debug, Clone, Object)]
pub struct UpdateQuantityRequest {
    /// New quantity (must be at least 1)
    pub quantity: i32,
}

impl UpdateQuantityRequest {
    pub fn validate(self, id: Uuid) -> Result<UpdateCartItemQuantityParams, CartItemError> {
        if self.quantity <= 0 {
            return Err(CartItemError::InvalidQuantity);
        }

        Ok(UpdateCartItemQuantityParams {
            id,
            quantity: self.quantity,
        })
    }
}

#[derive(Debug, Clone, Object)]
pub struct CartItemResponse {
    /// Cart line unique identifier
    pub id: String,
    /// Owning user
    pub user_id: i64,
    /// Product in the line
    pub product_id: i64,
    /// Units of the product
    pub quantity: i32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            user_id: item.user_id.value(),
            product_id: item.product_id.value(),
            quantity: item.quantity,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    /// Unit price in minor currency units
    pub price: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.value(),
            name: product.name,
            price: product.price,
        }
    }
}

/// A cart line as listed to its owner, with the product it refers to.
#[derive(Debug, Clone, Object)]
pub struct CartLineResponse {
    /// Cart line unique identifier
    pub id: String,
    pub product: ProductResponse,
    /// Units of the product
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.item.id.to_string(),
            product: line.product.into(),
            quantity: line.item.quantity,
            created_at: line.item.created_at,
            updated_at: line.item.updated_at,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CartResponse {
    /// Lines in the cart
    pub items: Vec<CartLineResponse>,
    /// Number of lines
    pub count: u64,
}

#[derive(Debug, Clone, Object)]
pub struct CartCountResponse {
    /// Number of lines in the cart, 0 when unknown
    pub count: u64,
}

#[derive(Debug, Clone, Object)]
pub struct ClearCartResponse {
    /// Number of lines removed
    pub count: u64,
}
