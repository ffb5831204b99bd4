use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::cart_item::errors::CartItemError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for CartItemError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match &self {
            CartItemError::InvalidQuantity | CartItemError::InvalidProductId => {
                (StatusCode::BAD_REQUEST, "ValidationError")
            }
            CartItemError::UserNotFound
            | CartItemError::ProductNotFound
            | CartItemError::NotFound => (StatusCode::NOT_FOUND, "NotFound"),
            CartItemError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message: self.to_string(),
            }),
        )
    }
}
