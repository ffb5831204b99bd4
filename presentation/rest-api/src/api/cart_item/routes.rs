use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::{Header, Path},
    payload::Json,
};
use uuid::Uuid;

use business::domain::cart_item::errors::CartItemError;
use business::domain::cart_item::use_cases::add::AddToCartUseCase;
use business::domain::cart_item::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use business::domain::cart_item::use_cases::count::{CountCartItemsParams, CountCartItemsUseCase};
use business::domain::cart_item::use_cases::get_all::{GetCartItemsParams, GetCartItemsUseCase};
use business::domain::cart_item::use_cases::remove::{RemoveCartItemParams, RemoveCartItemUseCase};
use business::domain::cart_item::use_cases::update_quantity::UpdateCartItemQuantityUseCase;
use business::domain::shared::value_objects::UserId;

use crate::api::cart_item::dto::{
    AddToCartRequest, CartCountResponse, CartItemResponse, CartLineResponse, CartResponse,
    ClearCartResponse, UpdateQuantityRequest,
};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::security::{JwtBearer, user_from_authorization};
use crate::api::tags::ApiTags;
use crate::config::jwt_config::JwtConfig;

pub struct CartApi {
    add_use_case: Arc<dyn AddToCartUseCase>,
    get_all_use_case: Arc<dyn GetCartItemsUseCase>,
    count_use_case: Arc<dyn CountCartItemsUseCase>,
    update_quantity_use_case: Arc<dyn UpdateCartItemQuantityUseCase>,
    remove_use_case: Arc<dyn RemoveCartItemUseCase>,
    clear_use_case: Arc<dyn ClearCartUseCase>,
    jwt_config: Arc<JwtConfig>,
}

impl CartApi {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        add_use_case: Arc<dyn AddToCartUseCase>,
        get_all_use_case: Arc<dyn GetCartItemsUseCase>,
        count_use_case: Arc<dyn CountCartItemsUseCase>,
        update_quantity_use_case: Arc<dyn UpdateCartItemQuantityUseCase>,
        remove_use_case: Arc<dyn RemoveCartItemUseCase>,
        clear_use_case: Arc<dyn ClearCartUseCase>,
        jwt_config: Arc<JwtConfig>,
    ) -> Self {
        Self {
            add_use_case,
            get_all_use_case,
            count_use_case,
            update_quantity_use_case,
            remove_use_case,
            clear_use_case,
            jwt_config,
        }
    }

    /// Line ids are global, so the caller's ownership is checked here before
    /// touching a line by id.
    async fn owns_line(&self, user_id: UserId, id: Uuid) -> Result<bool, CartItemError> {
        let items = self
            .get_all_use_case
            .execute(GetCartItemsParams { user_id })
            .await?;
        Ok(items.iter().any(|line| line.item.id == id))
    }
}

fn parse_line_id(raw: &str) -> Result<Uuid, Json<ErrorResponse>> {
    Uuid::parse_str(raw).map_err(|_| Json(ErrorResponse::validation("cart_item.invalid_id")))
}

/// Shopping cart API
///
/// Endpoints for managing the authenticated user's cart.
#[OpenApi]
impl CartApi {
    /// Add a product to the cart
    ///
    /// Adds the quantity to the existing line for the product, or creates a
    /// new line.
    #[oai(path = "/cart/items", method = "post", tag = "ApiTags::Cart")]
    async fn add(&self, auth: JwtBearer, body: Json<AddToCartRequest>) -> AddToCartResponse {
        let params = match body.0.validate(auth.0) {
            Ok(params) => params,
            Err(err) => {
                let (_status, json) = err.into_error_response();
                return AddToCartResponse::BadRequest(json);
            }
        };

        match self.add_use_case.execute(params).await {
            Ok(item) => AddToCartResponse::Ok(Json(item.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => AddToCartResponse::BadRequest(json),
                    404 => AddToCartResponse::NotFound(json),
                    _ => AddToCartResponse::InternalError(json),
                }
            }
        }
    }

    /// Get the cart
    ///
    /// Returns every line in the caller's cart with its product and the line
    /// count.
    #[oai(path = "/cart", method = "get", tag = "ApiTags::Cart")]
    async fn get_all(&self, auth: JwtBearer) -> GetCartResponse {
        match self
            .get_all_use_case
            .execute(GetCartItemsParams { user_id: auth.0 })
            .await
        {
            Ok(items) => {
                let items: Vec<CartLineResponse> = items.into_iter().map(|l| l.into()).collect();
                let count = items.len() as u64;
                GetCartResponse::Ok(Json(CartResponse { items, count }))
            }
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetCartResponse::InternalError(json)
            }
        }
    }

    /// Count cart lines
    ///
    /// Always succeeds. Reports 0 for anonymous callers, invalid tokens and
    /// internal failures.
    #[oai(path = "/cart/count", method = "get", tag = "ApiTags::Cart")]
    async fn count(
        &self,
        #[oai(name = "Authorization")] authorization: Header<Option<String>>,
    ) -> Json<CartCountResponse> {
        let count = match user_from_authorization(authorization.0.as_deref(), &self.jwt_config) {
            Some(user_id) => {
                self.count_use_case
                    .execute(CountCartItemsParams { user_id })
                    .await
            }
            None => 0,
        };

        Json(CartCountResponse { count })
    }

    /// Update a line's quantity
    ///
    /// Replaces the quantity of a line in the caller's cart.
    #[oai(path = "/cart/items/:id", method = "put", tag = "ApiTags::Cart")]
    async fn update_quantity(
        &self,
        auth: JwtBearer,
        id: Path<String>,
        body: Json<UpdateQuantityRequest>,
    ) -> UpdateQuantityResponse {
        let id = match parse_line_id(&id.0) {
            Ok(id) => id,
            Err(json) => return UpdateQuantityResponse::BadRequest(json),
        };
        let params = match body.0.validate(id) {
            Ok(params) => params,
            Err(err) => {
                let (_status, json) = err.into_error_response();
                return UpdateQuantityResponse::BadRequest(json);
            }
        };

        match self.owns_line(auth.0, id).await {
            Ok(true) => {}
            Ok(false) => {
                let (_status, json) = CartItemError::NotFound.into_error_response();
                return UpdateQuantityResponse::NotFound(json);
            }
            Err(err) => {
                let (_status, json) = err.into_error_response();
                return UpdateQuantityResponse::InternalError(json);
            }
        }

        match self.update_quantity_use_case.execute(params).await {
            Ok(item) => UpdateQuantityResponse::Ok(Json(item.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UpdateQuantityResponse::BadRequest(json),
                    404 => UpdateQuantityResponse::NotFound(json),
                    _ => UpdateQuantityResponse::InternalError(json),
                }
            }
        }
    }

    /// Remove a line
    ///
    /// Removing a line that is not in the caller's cart is a no-op.
    #[oai(path = "/cart/items/:id", method = "delete", tag = "ApiTags::Cart")]
    async fn remove(&self, auth: JwtBearer, id: Path<String>) -> RemoveCartItemResponse {
        let id = match parse_line_id(&id.0) {
            Ok(id) => id,
            Err(json) => return RemoveCartItemResponse::BadRequest(json),
        };

        match self.owns_line(auth.0, id).await {
            Ok(true) => {}
            Ok(false) => return RemoveCartItemResponse::NoContent,
            Err(err) => {
                let (_status, json) = err.into_error_response();
                return RemoveCartItemResponse::InternalError(json);
            }
        }

        match self
            .remove_use_case
            .execute(RemoveCartItemParams { id })
            .await
        {
            Ok(()) => RemoveCartItemResponse::NoContent,
            Err(err) => {
                let (_status, json) = err.into_error_response();
                RemoveCartItemResponse::InternalError(json)
            }
        }
    }

    /// Clear the cart
    ///
    /// Removes every line from the caller's cart.
    #[oai(path = "/cart/clear/all", method = "delete", tag = "ApiTags::Cart")]
    async fn clear(&self, auth: JwtBearer) -> ClearCartApiResponse {
        match self
            .clear_use_case
            .execute(ClearCartParams { user_id: auth.0 })
            .await
        {
            Ok(count) => ClearCartApiResponse::Ok(Json(ClearCartResponse { count })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => ClearCartApiResponse::NotFound(json),
                    _ => ClearCartApiResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum AddToCartResponse {
    #[oai(status = 200)]
    Ok(Json<CartItemResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetCartResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateQuantityResponse {
    #[oai(status = 200)]
    Ok(Json<CartItemResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum RemoveCartItemResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ClearCartApiResponse {
    #[oai(status = 200)]
    Ok(Json<ClearCartResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem::{Endpoint, EndpointExt, Route};
    use poem_openapi::OpenApiService;
    use serde_json::json;

    use business::domain::cart_item::model::{CartItem, CartLine};
    use business::domain::product::model::Product;
    use business::domain::cart_item::use_cases::add::AddToCartParams;
    use business::domain::cart_item::use_cases::update_quantity::UpdateCartItemQuantityParams;
    use business::domain::shared::value_objects::ProductId;

    use super::*;
    use crate::api::security::test_tokens::{config, valid_token};

    const KNOWN_USERS: [i64; 2] = [1, 2];
    const KNOWN_PRODUCTS: [i64; 2] = [10, 11];

    /// Cart service double backed by a vector.
    #[derive(Default)]
    struct StubCart {
        items: Mutex<Vec<CartItem>>,
        failing: bool,
    }

    impl StubCart {
        fn with_items(items: Vec<CartItem>) -> Self {
            Self {
                items: Mutex::new(items),
                failing: false,
            }
        }

        fn failing() -> Self {
            Self {
                failing: true,
                ..Self::default()
            }
        }

        fn lines_of(&self, user_id: UserId) -> Vec<CartItem> {
            let items = self.items.lock().unwrap();
            items
                .iter()
                .filter(|i| i.user_id == user_id)
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl AddToCartUseCase for StubCart {
        async fn execute(&self, params: AddToCartParams) -> Result<CartItem, CartItemError> {
            if !KNOWN_PRODUCTS.contains(&params.product_id.value()) {
                return Err(CartItemError::ProductNotFound);
            }
            let item = CartItem::new(params.user_id, params.product_id, params.quantity);
            self.items.lock().unwrap().push(item.clone());
            Ok(item)
        }
    }

    #[async_trait]
    impl GetCartItemsUseCase for StubCart {
        async fn execute(
            &self,
            params: GetCartItemsParams,
        ) -> Result<Vec<CartLine>, CartItemError> {
            if self.failing {
                return Err(CartItemError::Repository(
                    business::domain::errors::RepositoryError::DatabaseError,
                ));
            }
            Ok(self
                .lines_of(params.user_id)
                .into_iter()
                .map(|item| CartLine {
                    product: Product {
                        id: item.product_id,
                        name: format!("Product {}", item.product_id),
                        price: 1_500,
                    },
                    item,
                })
                .collect())
        }
    }

    #[async_trait]
    impl CountCartItemsUseCase for StubCart {
        async fn execute(&self, params: CountCartItemsParams) -> u64 {
            if self.failing {
                return 0;
            }
            self.lines_of(params.user_id).len() as u64
        }
    }

    #[async_trait]
    impl UpdateCartItemQuantityUseCase for StubCart {
        async fn execute(
            &self,
            params: UpdateCartItemQuantityParams,
        ) -> Result<CartItem, CartItemError> {
            let mut items = self.items.lock().unwrap();
            let item = items
                .iter_mut()
                .find(|i| i.id == params.id)
                .ok_or(CartItemError::NotFound)?;
            item.set_quantity(params.quantity);
            Ok(item.clone())
        }
    }

    #[async_trait]
    impl RemoveCartItemUseCase for StubCart {
        async fn execute(&self, params: RemoveCartItemParams) -> Result<(), CartItemError> {
            self.items.lock().unwrap().retain(|i| i.id != params.id);
            Ok(())
        }
    }

    #[async_trait]
    impl ClearCartUseCase for StubCart {
        async fn execute(&self, params: ClearCartParams) -> Result<u64, CartItemError> {
            if !KNOWN_USERS.contains(&params.user_id.value()) {
                return Err(CartItemError::UserNotFound);
            }
            let mut items = self.items.lock().unwrap();
            let before = items.len();
            items.retain(|i| i.user_id != params.user_id);
            Ok((before - items.len()) as u64)
        }
    }

    fn app(cart: Arc<StubCart>) -> impl Endpoint {
        let jwt = Arc::new(config());
        let api = CartApi::new(
            cart.clone(),
            cart.clone(),
            cart.clone(),
            cart.clone(),
            cart.clone(),
            cart,
            jwt.clone(),
        );
        let service = OpenApiService::new(api, "Cart API", "test");
        Route::new().nest("/", service).data(jwt)
    }

    fn bearer(user_id: i64) -> String {
        format!("Bearer {}", valid_token(user_id))
    }

    fn line(user_id: i64, product_id: i64, quantity: i32) -> CartItem {
        CartItem::new(UserId::new(user_id), ProductId::new(product_id), quantity)
    }

    #[tokio::test]
    async fn should_count_zero_without_token() {
        let cart = Arc::new(StubCart::with_items(vec![line(1, 10, 1)]));
        let cli = TestClient::new(app(cart));

        let resp = cli.get("/cart/count").send().await;

        resp.assert_status_is_ok();
        resp.assert_json(json!({ "count": 0 })).await;
    }

    #[tokio::test]
    async fn should_count_zero_with_invalid_token() {
        let cart = Arc::new(StubCart::with_items(vec![line(1, 10, 1)]));
        let cli = TestClient::new(app(cart));

        let resp = cli
            .get("/cart/count")
            .header("Authorization", "Bearer not-a-jwt")
            .send()
            .await;

        resp.assert_status_is_ok();
        resp.assert_json(json!({ "count": 0 })).await;
    }

    #[tokio::test]
    async fn should_count_lines_of_caller() {
        let cart = Arc::new(StubCart::with_items(vec![
            line(1, 10, 4),
            line(1, 11, 1),
            line(2, 10, 1),
        ]));
        let cli = TestClient::new(app(cart));

        let resp = cli
            .get("/cart/count")
            .header("Authorization", bearer(1))
            .send()
            .await;

        resp.assert_status_is_ok();
        resp.assert_json(json!({ "count": 2 })).await;
    }

    #[tokio::test]
    async fn should_reject_add_without_token() {
        let cli = TestClient::new(app(Arc::new(StubCart::default())));

        let resp = cli
            .post("/cart/items")
            .body_json(&json!({ "product_id": 10, "quantity": 1 }))
            .send()
            .await;

        resp.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_add_item_for_caller() {
        let cart = Arc::new(StubCart::default());
        let cli = TestClient::new(app(cart.clone()));

        let resp = cli
            .post("/cart/items")
            .header("Authorization", bearer(1))
            .body_json(&json!({ "product_id": 10, "quantity": 2 }))
            .send()
            .await;

        resp.assert_status_is_ok();
        let json = resp.json().await;
        let body = json.value().object();
        body.get("user_id").assert_i64(1);
        body.get("product_id").assert_i64(10);
        body.get("quantity").assert_i64(2);
        assert_eq!(cart.lines_of(UserId::new(1)).len(), 1);
    }

    #[tokio::test]
    async fn should_reject_add_with_invalid_input_before_service() {
        let cart = Arc::new(StubCart::default());
        let cli = TestClient::new(app(cart.clone()));

        for (body, message) in [
            (json!({ "quantity": 1 }), "cart_item.invalid_product_id"),
            (
                json!({ "product_id": 0, "quantity": 1 }),
                "cart_item.invalid_product_id",
            ),
            (
                json!({ "product_id": 10, "quantity": 0 }),
                "cart_item.invalid_quantity",
            ),
        ] {
            let resp = cli
                .post("/cart/items")
                .header("Authorization", bearer(1))
                .body_json(&body)
                .send()
                .await;

            resp.assert_status(StatusCode::BAD_REQUEST);
            resp.assert_json(json!({ "name": "ValidationError", "message": message }))
                .await;
        }
        assert!(cart.lines_of(UserId::new(1)).is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_product() {
        let cli = TestClient::new(app(Arc::new(StubCart::default())));

        let resp = cli
            .post("/cart/items")
            .header("Authorization", bearer(1))
            .body_json(&json!({ "product_id": 999, "quantity": 1 }))
            .send()
            .await;

        resp.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_list_cart_with_count() {
        let cart = Arc::new(StubCart::with_items(vec![line(1, 10, 2), line(2, 11, 1)]));
        let cli = TestClient::new(app(cart));

        let resp = cli.get("/cart").header("Authorization", bearer(1)).send().await;

        resp.assert_status_is_ok();
        let json = resp.json().await;
        let body = json.value().object();
        body.get("count").assert_i64(1);
        let items = body.get("items").array();
        items.assert_len(1);
        let line = items.get(0).object();
        line.get("quantity").assert_i64(2);
        let product = line.get("product").object();
        product.get("id").assert_i64(10);
        product.get("name").assert_string("Product 10");
        product.get("price").assert_i64(1_500);
    }

    #[tokio::test]
    async fn should_return_server_error_when_listing_fails() {
        let cli = TestClient::new(app(Arc::new(StubCart::failing())));

        let resp = cli.get("/cart").header("Authorization", bearer(1)).send().await;

        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn should_count_zero_when_service_fails() {
        let cli = TestClient::new(app(Arc::new(StubCart::failing())));

        let resp = cli
            .get("/cart/count")
            .header("Authorization", bearer(1))
            .send()
            .await;

        resp.assert_status_is_ok();
        resp.assert_json(json!({ "count": 0 })).await;
    }

    #[tokio::test]
    async fn should_update_quantity_of_own_line() {
        let item = line(1, 10, 2);
        let path = format!("/cart/items/{}", item.id);
        let cli = TestClient::new(app(Arc::new(StubCart::with_items(vec![item]))));

        let resp = cli
            .put(path)
            .header("Authorization", bearer(1))
            .body_json(&json!({ "quantity": 6 }))
            .send()
            .await;

        resp.assert_status_is_ok();
        resp.json().await.value().object().get("quantity").assert_i64(6);
    }

    #[tokio::test]
    async fn should_not_update_line_of_another_user() {
        let item = line(2, 10, 2);
        let path = format!("/cart/items/{}", item.id);
        let cart = Arc::new(StubCart::with_items(vec![item]));
        let cli = TestClient::new(app(cart.clone()));

        let resp = cli
            .put(path)
            .header("Authorization", bearer(1))
            .body_json(&json!({ "quantity": 6 }))
            .send()
            .await;

        resp.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(cart.lines_of(UserId::new(2))[0].quantity, 2);
    }

    #[tokio::test]
    async fn should_reject_malformed_line_id() {
        let cli = TestClient::new(app(Arc::new(StubCart::default())));

        let resp = cli
            .delete("/cart/items/not-a-uuid")
            .header("Authorization", bearer(1))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_remove_own_line_and_ignore_others() {
        let own = line(1, 10, 1);
        let foreign = line(2, 10, 1);
        let own_path = format!("/cart/items/{}", own.id);
        let foreign_path = format!("/cart/items/{}", foreign.id);
        let cart = Arc::new(StubCart::with_items(vec![own, foreign]));
        let cli = TestClient::new(app(cart.clone()));

        let resp = cli
            .delete(own_path)
            .header("Authorization", bearer(1))
            .send()
            .await;
        resp.assert_status(StatusCode::NO_CONTENT);

        let resp = cli
            .delete(foreign_path)
            .header("Authorization", bearer(1))
            .send()
            .await;
        resp.assert_status(StatusCode::NO_CONTENT);

        assert!(cart.lines_of(UserId::new(1)).is_empty());
        assert_eq!(cart.lines_of(UserId::new(2)).len(), 1);
    }

    #[tokio::test]
    async fn should_clear_cart_of_caller() {
        let cart = Arc::new(StubCart::with_items(vec![
            line(1, 10, 1),
            line(1, 11, 1),
            line(2, 10, 1),
        ]));
        let cli = TestClient::new(app(cart.clone()));

        let resp = cli
            .delete("/cart/clear/all")
            .header("Authorization", bearer(1))
            .send()
            .await;

        resp.assert_status_is_ok();
        resp.assert_json(json!({ "count": 2 })).await;
        assert!(cart.lines_of(UserId::new(1)).is_empty());
        assert_eq!(cart.lines_of(UserId::new(2)).len(), 1);
    }

    #[tokio::test]
    async fn should_return_not_found_when_clearing_for_unknown_user() {
        let cli = TestClient::new(app(Arc::new(StubCart::default())));

        let resp = cli
            .delete("/cart/clear/all")
            .header("Authorization", bearer(42))
            .send()
            .await;

        resp.assert_status(StatusCode::NOT_FOUND);
    }
}
