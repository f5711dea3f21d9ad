#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;
use supplier_registry::AppState;
use supplier_registry::core::{JwtSettings, issue_token};
use supplier_registry::dtos::UserResponseDTO;
use supplier_registry::entities::{User, UserClaim};
use uuid::Uuid;

pub const JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";

/// Password che rispetta la policy (maiuscola, minuscola, cifra, simbolo)
pub const STRONG_PASSWORD: &str = "Passw0rd!";

pub fn test_jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: JWT_SECRET.to_string(),
        expiration_hours: 1,
        issuer: "supplier-registry".to_string(),
        audience: "https://localhost".to_string(),
    }
}

/// Crea un AppState in memoria per i test
///
/// # Returns
/// Arc<AppState> con JWT di test e costo bcrypt minimo
pub fn create_test_state() -> Arc<AppState> {
    Arc::new(AppState::in_memory(test_jwt_settings(), 4))
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `state` - AppState da utilizzare per il server
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = supplier_registry::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Genera un JWT valido senza passare dallo store utenti
///
/// # Arguments
/// * `claims` - coppie (tipo, valore) da inserire nel token
pub fn create_test_jwt(claims: &[(&str, &str)]) -> String {
    let user = User {
        user_id: Uuid::new_v4(),
        username: "tester@example.com".to_string(),
        email: "tester@example.com".to_string(),
        password: String::new(),
    };
    let claims: Vec<UserClaim> = claims
        .iter()
        .map(|(claim_type, value)| UserClaim::new(*claim_type, *value))
        .collect();

    issue_token(&test_jwt_settings(), &user, &claims, &[])
        .expect("Failed to create JWT token")
        .access_token
}

/// Registra un utente via HTTP e restituisce la risposta col token
pub async fn register(server: &TestServer, email: &str) -> UserResponseDTO {
    let response = server
        .post("/register")
        .json(&json!({
            "email": email,
            "password": STRONG_PASSWORD,
            "confirm_password": STRONG_PASSWORD
        }))
        .await;
    response.assert_status_ok();
    response.json::<UserResponseDTO>()
}

/// Login via HTTP, restituisce l'access token
pub async fn login(server: &TestServer, email: &str) -> String {
    let response = server
        .post("/login")
        .json(&json!({ "email": email, "password": STRONG_PASSWORD }))
        .await;
    response.assert_status_ok();
    response.json::<UserResponseDTO>().access_token
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn supplier_body(name: &str, document: &str) -> serde_json::Value {
    json!({ "name": name, "document": document, "active": true })
}

/// AppState sui repository MySQL, per i test `#[sqlx::test]`
///
/// # Arguments
/// * `pool` - Pool del database di test creato da sqlx (migrations già applicate)
pub fn create_mysql_state(pool: sqlx::MySqlPool) -> Arc<AppState> {
    Arc::new(AppState::new(pool, test_jwt_settings(), 4))
}
