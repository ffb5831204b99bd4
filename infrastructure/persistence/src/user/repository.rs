use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::UserId;
use business::domain::user::model::User;
use business::domain::user::repository::UserRepository;

use super::entity::UserEntity;
use crate::db::database_error;

/// Read-only view of the user directory's `users` table.
pub struct UserRepositoryPostgres {
    pool: PgPool,
}

impl UserRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn get_by_id(&self, id: UserId) -> Result<User, RepositoryError> {
        let entity =
            sqlx::query_as::<_, UserEntity>("SELECT id, login_id, name FROM users WHERE id = $1")
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?
                .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }
}
