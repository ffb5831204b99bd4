use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;
use uuid::Uuid;

use crate::domain::cart_item::model::CartItem;
use crate::domain::cart_item::repository::CartItemRepository;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::shared::value_objects::{ProductId, UserId};
use crate::domain::user::model::User;
use crate::domain::user::repository::UserRepository;

mock! {
    pub CartItemRepo {}

    #[async_trait]
    impl CartItemRepository for CartItemRepo {
        async fn get_by_user(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError>;
        async fn get_by_id(&self, id: Uuid) -> Result<CartItem, RepositoryError>;
        async fn find_by_user_and_product(&self, user_id: UserId, product_id: ProductId) -> Result<Option<CartItem>, RepositoryError>;
        async fn insert_or_increment(&self, item: &CartItem) -> Result<CartItem, RepositoryError>;
        async fn update_quantity(&self, item: &CartItem) -> Result<CartItem, RepositoryError>;
        async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
        async fn delete_by_user(&self, user_id: UserId) -> Result<u64, RepositoryError>;
        async fn delete_by_product(&self, product_id: ProductId) -> Result<u64, RepositoryError>;
    }
}

mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn get_by_id(&self, id: UserId) -> Result<User, RepositoryError>;
    }
}

mock! {
    pub ProductRepo {}

    #[async_trait]
    impl ProductRepository for ProductRepo {
        async fn get_by_id(&self, id: ProductId) -> Result<Product, RepositoryError>;
    }
}

mock! {
    pub Log {}

    impl Logger for Log {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn debug(&self, message: &str);
    }
}

pub fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

pub fn test_user(id: i64) -> User {
    User {
        id: UserId::new(id),
        login_id: format!("user{id}"),
        name: format!("User {id}"),
    }
}

pub fn test_product(id: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: 1_000,
    }
}

pub fn existing_user_repo() -> MockUserRepo {
    let mut repo = MockUserRepo::new();
    repo.expect_get_by_id()
        .returning(|id| Ok(test_user(id.value())));
    repo
}

pub fn missing_user_repo() -> MockUserRepo {
    let mut repo = MockUserRepo::new();
    repo.expect_get_by_id()
        .returning(|_| Err(RepositoryError::NotFound));
    repo
}

/// Known users and products, for use cases wired to [`InMemoryCartItems`].
pub struct Directory {
    users: HashSet<i64>,
    products: HashSet<i64>,
}

impl Directory {
    pub fn new(users: &[i64], products: &[i64]) -> Self {
        Self {
            users: users.iter().copied().collect(),
            products: products.iter().copied().collect(),
        }
    }
}

#[async_trait]
impl UserRepository for Directory {
    async fn get_by_id(&self, id: UserId) -> Result<User, RepositoryError> {
        self.users
            .contains(&id.value())
            .then(|| test_user(id.value()))
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl ProductRepository for Directory {
    async fn get_by_id(&self, id: ProductId) -> Result<Product, RepositoryError> {
        self.products
            .contains(&id.value())
            .then(|| test_product(id.value()))
            .ok_or(RepositoryError::NotFound)
    }
}

/// In-memory store honouring the one-line-per-(user, product) contract.
/// Each write happens under one lock, like the single SQL statements of the
/// Postgres adapter.
#[derive(Default)]
pub struct InMemoryCartItems {
    items: Mutex<Vec<CartItem>>,
}

impl InMemoryCartItems {
    pub fn line_count(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    fn increment(&self, item: &CartItem) -> CartItem {
        let mut items = self.items.lock().unwrap();
        match items
            .iter_mut()
            .find(|i| i.user_id == item.user_id && i.product_id == item.product_id)
        {
            Some(stored) => {
                stored.quantity = stored.quantity.saturating_add(item.quantity);
                stored.updated_at = item.updated_at;
                stored.clone()
            }
            None => {
                items.push(item.clone());
                item.clone()
            }
        }
    }

    fn remove(&self, id: Uuid) {
        self.items.lock().unwrap().retain(|i| i.id != id);
    }
}

#[async_trait]
impl CartItemRepository for InMemoryCartItems {
    async fn get_by_user(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<CartItem, RepositoryError> {
        let items = self.items.lock().unwrap();
        items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_user_and_product(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .find(|i| i.user_id == user_id && i.product_id == product_id)
            .cloned())
    }

    async fn insert_or_increment(&self, item: &CartItem) -> Result<CartItem, RepositoryError> {
        Ok(self.increment(item))
    }

    async fn update_quantity(&self, item: &CartItem) -> Result<CartItem, RepositoryError> {
        let mut items = self.items.lock().unwrap();
        let stored = items
            .iter_mut()
            .find(|i| i.id == item.id)
            .ok_or(RepositoryError::NotFound)?;
        stored.quantity = item.quantity;
        stored.updated_at = item.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.remove(id);
        Ok(())
    }

    async fn delete_by_user(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| i.user_id != user_id);
        Ok((before - items.len()) as u64)
    }

    async fn delete_by_product(&self, product_id: ProductId) -> Result<u64, RepositoryError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| i.product_id != product_id);
        Ok((before - items.len()) as u64)
    }
}

/// Another request committing while a use case is between its steps.
pub enum Interleaving {
    /// The line is removed right after it was read by id.
    RemoveAfterRead,
    /// The same product is added with this quantity right before the write.
    AddBeforeWrite(i32),
}

/// [`InMemoryCartItems`] with a concurrent request slipped in between the
/// steps of a use case.
pub struct InterleavedCartItems {
    pub store: InMemoryCartItems,
    interleaving: Interleaving,
}

impl InterleavedCartItems {
    pub fn new(store: InMemoryCartItems, interleaving: Interleaving) -> Self {
        Self {
            store,
            interleaving,
        }
    }
}

#[async_trait]
impl CartItemRepository for InterleavedCartItems {
    async fn get_by_user(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        self.store.get_by_user(user_id).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<CartItem, RepositoryError> {
        let item = self.store.get_by_id(id).await?;
        if let Interleaving::RemoveAfterRead = self.interleaving {
            self.store.remove(id);
        }
        Ok(item)
    }

    async fn find_by_user_and_product(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        self.store.find_by_user_and_product(user_id, product_id).await
    }

    async fn insert_or_increment(&self, item: &CartItem) -> Result<CartItem, RepositoryError> {
        if let Interleaving::AddBeforeWrite(quantity) = self.interleaving {
            self.store
                .increment(&CartItem::new(item.user_id, item.product_id, quantity));
        }
        self.store.insert_or_increment(item).await
    }

    async fn update_quantity(&self, item: &CartItem) -> Result<CartItem, RepositoryError> {
        self.store.update_quantity(item).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.store.delete(id).await
    }

    async fn delete_by_user(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        self.store.delete_by_user(user_id).await
    }

    async fn delete_by_product(&self, product_id: ProductId) -> Result<u64, RepositoryError> {
        self.store.delete_by_product(product_id).await
    }
}
