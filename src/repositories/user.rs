//! UserRepository - Repository per utenti, claim e ruoli

use super::{Create, IdentityStore, PoolType};
use crate::dtos::CreateUserDTO;
use crate::entities::{User, UserClaim};
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

pub struct UserRepository {
    connection_pool: PoolType,
}

impl UserRepository {
    pub fn new(connection_pool: PoolType) -> UserRepository {
        Self { connection_pool }
    }
}

#[async_trait]
impl Create<User, CreateUserDTO> for UserRepository {
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        let user_id = Uuid::new_v4();

        // email ha un vincolo UNIQUE: un duplicato arriva qui come sqlx::Error::Database
        sqlx::query("INSERT INTO users (user_id, username, email, password) VALUES (?, ?, ?, ?)")
            .bind(user_id)
            .bind(&data.username)
            .bind(&data.email)
            .bind(&data.password)
            .execute(&self.connection_pool)
            .await?;

        Ok(User {
            user_id,
            username: data.username.clone(),
            email: data.email.clone(),
            password: data.password.clone(),
        })
    }
}

#[async_trait]
impl IdentityStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, username, email, password FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }

    async fn claims_for(&self, user_id: &Uuid) -> Result<Vec<UserClaim>, Error> {
        let claims = sqlx::query_as::<_, UserClaim>(
            "SELECT claim_type, claim_value FROM user_claims WHERE user_id = ? ORDER BY claim_type",
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(claims)
    }

    async fn roles_for(&self, user_id: &Uuid) -> Result<Vec<String>, Error> {
        let roles = sqlx::query_scalar::<_, String>(
            "SELECT role_name FROM user_roles WHERE user_id = ? ORDER BY role_name",
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(roles)
    }

    async fn add_claim(&self, user_id: &Uuid, claim: &UserClaim) -> Result<(), Error> {
        sqlx::query(
            "INSERT IGNORE INTO user_claims (user_id, claim_type, claim_value) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(&claim.claim_type)
        .bind(&claim.claim_value)
        .execute(&self.connection_pool)
        .await?;

        Ok(())
    }
}
