//! User DTOs - Data Transfer Objects per registrazione, login e token

use crate::entities::UserClaim;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// DTO per la registrazione di un nuovo utente
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct RegisterUserDTO {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "The email field is required"),
        email(message = "The email field is not a valid e-mail address")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, max = 100, message = "The password must be between 6 and 100 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(must_match(other = "password", message = "The passwords do not match"))]
    pub confirm_password: String,
}

/// DTO per il login (solo email e password)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct LoginUserDTO {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "The email field is required"),
        email(message = "The email field is not a valid e-mail address")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, max = 100, message = "The password must be between 6 and 100 characters"))]
    pub password: String,
}

/// DTO per creare un nuovo utente nello store (password già hashata)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateUserDTO {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Risposta di login/registrazione: token firmato + informazioni sull'utente
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponseDTO {
    pub access_token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user_token: UserTokenDTO,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserTokenDTO {
    pub id: Uuid,
    pub email: String,
    pub claims: Vec<UserClaim>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_malformed_email() {
        let body = RegisterUserDTO {
            email: "not-an-email".to_string(),
            password: "Passw0rd!".to_string(),
            confirm_password: "Passw0rd!".to_string(),
        };
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_register_password_mismatch() {
        let body = RegisterUserDTO {
            email: "mario@example.com".to_string(),
            password: "Passw0rd!".to_string(),
            confirm_password: "Passw0rd?".to_string(),
        };
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("confirm_password"));
    }

    #[test]
    fn test_login_short_password() {
        let body = LoginUserDTO {
            email: "mario@example.com".to_string(),
            password: "abc".to_string(),
        };
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_claims_serialize_as_type_value() {
        let claim = UserClaim::new("DeleteSupplier", "true");
        let json = serde_json::to_value(&claim).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "DeleteSupplier", "value": "true" }));
    }
}
