//! User entity - Entità utente con metodi per gestione password

use bcrypt::{hash, verify};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub user_id: Uuid,
    /// Always equal to the email at registration time
    pub username: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// Verify if target_password matches the stored hashed password
    pub fn verify_password(&self, target_password: &str) -> bool {
        verify(target_password, &self.password).unwrap_or(false)
    }

    /// Hash a password using bcrypt with the given cost
    pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
        let hash = hash(password, cost)?;
        Ok(hash)
    }
}

/// Claim associata a un utente, finisce dentro il token JWT come `claim_type: claim_value`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserClaim {
    #[serde(rename = "type")]
    pub claim_type: String,
    #[serde(rename = "value")]
    pub claim_value: String,
}

impl UserClaim {
    pub fn new(claim_type: impl Into<String>, claim_value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            claim_value: claim_value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hashed = User::hash_password("Secret#123", 4).unwrap();
        let user = User {
            user_id: Uuid::new_v4(),
            username: "mario@example.com".to_string(),
            email: "mario@example.com".to_string(),
            password: hashed,
        };

        assert!(user.verify_password("Secret#123"));
        assert!(!user.verify_password("secret#123"));
    }

    #[test]
    fn test_verify_password_with_garbage_hash() {
        let user = User {
            user_id: Uuid::new_v4(),
            username: "x@example.com".to_string(),
            email: "x@example.com".to_string(),
            password: "not-a-bcrypt-hash".to_string(),
        };

        assert!(!user.verify_password("whatever"));
    }
}
