use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Represents a user in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique username.
    pub username: String,
    /// User's unique email address.
    pub email: String,
    /// Securely hashed password string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Timestamp when the user was created.
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::robot::Entity")]
    Robots,
}

impl Related<super::robot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Robots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Hashes a plaintext password with argon2 and a fresh random salt.
    pub fn hash_password(password: &str) -> Result<String, DbErr> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DbErr::Custom(format!("password hashing failed: {}", e)))?
            .to_string();
        Ok(hash)
    }

    /// Checks a plaintext password against the stored argon2 hash.
    pub fn verify_password(&self, password: &str) -> bool {
        match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    pub async fn create(
        db: &DbConn,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Model, DbErr> {
        let user = ActiveModel {
            username: Set(username.to_owned()),
            email: Set(email.to_owned()),
            password_hash: Set(Self::hash_password(password)?),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        user.insert(db).await
    }

    pub async fn get_by_username(db: &DbConn, username: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Username.eq(username))
            .one(db)
            .await
    }

    pub async fn get_by_email(db: &DbConn, email: &str) -> Result<Option<Model>, DbErr> {
        Entity::find().filter(Column::Email.eq(email)).one(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::Model as UserModel;
    use crate::test_utils::setup_test_db;
    use sea_orm::DbErr;

    #[tokio::test]
    async fn password_hash_roundtrip() {
        let db = setup_test_db().await;
        let user = UserModel::create(&db, "alice", "alice@example.com", "hunter22")
            .await
            .unwrap();

        assert_ne!(user.password_hash, "hunter22");
        assert!(user.verify_password("hunter22"));
        assert!(!user.verify_password("hunter23"));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let db = setup_test_db().await;
        UserModel::create(&db, "bob", "bob@example.com", "password")
            .await
            .unwrap();

        let dup = UserModel::create(&db, "bob", "other@example.com", "password").await;
        assert!(matches!(dup, Err(DbErr::Exec(_)) | Err(DbErr::Query(_))));
    }
}
