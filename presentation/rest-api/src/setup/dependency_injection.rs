use std::sync::Arc;

use logger::TracingLogger;
use persistence::cart_item::repository::CartItemRepositoryPostgres;
use persistence::product::repository::ProductRepositoryPostgres;
use persistence::user::repository::UserRepositoryPostgres;

use business::application::cart_item::add::AddToCartUseCaseImpl;
use business::application::cart_item::clear::ClearCartUseCaseImpl;
use business::application::cart_item::count::CountCartItemsUseCaseImpl;
use business::application::cart_item::get_all::GetCartItemsUseCaseImpl;
use business::application::cart_item::remove::RemoveCartItemUseCaseImpl;
use business::application::cart_item::update_quantity::UpdateCartItemQuantityUseCaseImpl;

use crate::api::cart_item::routes::CartApi;
use crate::api::health::routes::Api as HealthApi;
use crate::config::jwt_config::JwtConfig;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub cart_api: CartApi,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool, jwt_config: Arc<JwtConfig>) -> Self {
        let logger = Arc::new(TracingLogger);
        let health_api = HealthApi::new(pool.clone());

        // Infrastructure adapters
        let user_repository = Arc::new(UserRepositoryPostgres::new(pool.clone()));
        let product_repository = Arc::new(ProductRepositoryPostgres::new(pool.clone()));
        let cart_item_repository = Arc::new(CartItemRepositoryPostgres::new(pool));

        // Cart use cases
        let add_use_case = Arc::new(AddToCartUseCaseImpl {
            repository: cart_item_repository.clone(),
            user_repository: user_repository.clone(),
            product_repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let get_all_use_case = Arc::new(GetCartItemsUseCaseImpl {
            repository: cart_item_repository.clone(),
            user_repository: user_repository.clone(),
            product_repository,
            logger: logger.clone(),
        });
        let count_use_case = Arc::new(CountCartItemsUseCaseImpl {
            repository: cart_item_repository.clone(),
            user_repository: user_repository.clone(),
            logger: logger.clone(),
        });
        let update_quantity_use_case = Arc::new(UpdateCartItemQuantityUseCaseImpl {
            repository: cart_item_repository.clone(),
            logger: logger.clone(),
        });
        let remove_use_case = Arc::new(RemoveCartItemUseCaseImpl {
            repository: cart_item_repository.clone(),
            logger: logger.clone(),
        });
        let clear_use_case = Arc::new(ClearCartUseCaseImpl {
            repository: cart_item_repository,
            user_repository,
            logger,
        });

        let cart_api = CartApi::new(
            add_use_case,
            get_all_use_case,
            count_use_case,
            update_quantity_use_case,
            remove_use_case,
            clear_use_case,
            jwt_config,
        );

        Self {
            health_api,
            cart_api,
        }
    }
}
