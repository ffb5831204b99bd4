use sqlx::FromRow;

use business::domain::shared::value_objects::UserId;
use business::domain::user::model::User;

#[derive(Debug, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub login_id: String,
    pub name: String,
}

impl UserEntity {
    pub fn into_domain(self) -> User {
        User {
            id: UserId::new(self.id),
            login_id: self.login_id,
            name: self.name,
        }
    }
}
