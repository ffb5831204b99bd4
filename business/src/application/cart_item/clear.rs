use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::repository::CartItemRepository;
use crate::domain::cart_item::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::user::repository::UserRepository;

pub struct ClearCartUseCaseImpl {
    pub repository: Arc<dyn CartItemRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ClearCartUseCase for ClearCartUseCaseImpl {
    async fn execute(&self, params: ClearCartParams) -> Result<u64, CartItemError> {
        self.logger
            .info(&format!("Clearing cart of user {}", params.user_id));

        self.user_repository
            .get_by_id(params.user_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CartItemError::UserNotFound,
                other => CartItemError::Repository(other),
            })?;

        let count = self.repository.delete_by_user(params.user_id).await?;

        self.logger.info(&format!(
            "Cleared {} cart items of user {}",
            count, params.user_id
        ));
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cart_item::add::AddToCartUseCaseImpl;
    use crate::application::cart_item::get_all::GetCartItemsUseCaseImpl;
    use crate::application::cart_item::test_support::{
        Directory, InMemoryCartItems, MockCartItemRepo, existing_user_repo, missing_user_repo,
        mock_logger,
    };
    use crate::domain::cart_item::model::CartItem;
    use crate::domain::cart_item::use_cases::add::{AddToCartParams, AddToCartUseCase};
    use crate::domain::cart_item::use_cases::get_all::{GetCartItemsParams, GetCartItemsUseCase};
    use crate::domain::shared::value_objects::{ProductId, UserId};

    #[tokio::test]
    async fn should_delete_all_lines_of_user() {
        let mut mock_repo = MockCartItemRepo::new();
        mock_repo
            .expect_delete_by_user()
            .withf(|user_id| *user_id == UserId::new(1))
            .times(1)
            .returning(|_| Ok(2));

        let use_case = ClearCartUseCaseImpl {
            repository: Arc::new(mock_repo),
            user_repository: Arc::new(existing_user_repo()),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(ClearCartParams {
                user_id: UserId::new(1),
            })
            .await;

        assert_eq!(result.unwrap(), 2);
    }

    #[tokio::test]
    async fn should_return_user_not_found_without_deleting() {
        let mut mock_repo = MockCartItemRepo::new();
        mock_repo.expect_delete_by_user().never();

        let use_case = ClearCartUseCaseImpl {
            repository: Arc::new(mock_repo),
            user_repository: Arc::new(missing_user_repo()),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(ClearCartParams {
                user_id: UserId::new(404),
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartItemError::UserNotFound));
    }

    #[tokio::test]
    async fn should_be_idempotent_and_leave_other_carts_alone() {
        let store = Arc::new(InMemoryCartItems::default());
        store
            .insert_or_increment(&CartItem::new(UserId::new(1), ProductId::new(10), 1))
            .await
            .unwrap();
        store
            .insert_or_increment(&CartItem::new(UserId::new(2), ProductId::new(10), 1))
            .await
            .unwrap();

        let use_case = ClearCartUseCaseImpl {
            repository: store.clone(),
            user_repository: Arc::new(Directory::new(&[1, 2], &[])),
            logger: mock_logger(),
        };
        let params = || ClearCartParams {
            user_id: UserId::new(1),
        };

        assert_eq!(use_case.execute(params()).await.unwrap(), 1);
        assert_eq!(use_case.execute(params()).await.unwrap(), 0);
        assert_eq!(store.get_by_user(UserId::new(2)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_run_add_merge_and_clear_scenario() {
        let store = Arc::new(InMemoryCartItems::default());
        let directory = Arc::new(Directory::new(&[1], &[10, 11]));
        let add = AddToCartUseCaseImpl {
            repository: store.clone(),
            user_repository: directory.clone(),
            product_repository: directory.clone(),
            logger: mock_logger(),
        };
        let get_all = GetCartItemsUseCaseImpl {
            repository: store.clone(),
            user_repository: directory.clone(),
            product_repository: directory.clone(),
            logger: mock_logger(),
        };
        let clear = ClearCartUseCaseImpl {
            repository: store.clone(),
            user_repository: directory,
            logger: mock_logger(),
        };
        let add_params = |product_id: i64, quantity: i32| AddToCartParams {
            user_id: UserId::new(1),
            product_id: ProductId::new(product_id),
            quantity,
        };
        let list = || GetCartItemsParams {
            user_id: UserId::new(1),
        };

        let first = add.execute(add_params(10, 2)).await.unwrap();
        assert_eq!(first.quantity, 2);

        let merged = add.execute(add_params(10, 3)).await.unwrap();
        assert_eq!(merged.id, first.id);
        assert_eq!(merged.quantity, 5);
        assert_eq!(get_all.execute(list()).await.unwrap().len(), 1);

        add.execute(add_params(11, 1)).await.unwrap();
        assert_eq!(get_all.execute(list()).await.unwrap().len(), 2);

        let cleared = clear
            .execute(ClearCartParams {
                user_id: UserId::new(1),
            })
            .await
            .unwrap();
        assert_eq!(cleared, 2);
        assert!(get_all.execute(list()).await.unwrap().is_empty());
    }
}
