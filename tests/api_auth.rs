//! Integration tests per gli endpoints di autenticazione
//!
//! Test per:
//! - POST /register
//! - POST /login
//!
//! Lo stato è in memoria: ogni test parte da store vuoti.

mod common;

#[cfg(test)]
mod auth_tests {
    use super::common::*;
    use serde_json::json;
    use supplier_registry::core::decode_jwt;

    #[tokio::test]
    async fn test_root_health() {
        let server = create_test_server(create_test_state());

        let response = server.get("/").await;

        response.assert_status_ok();
        response.assert_text("Server is running!");
    }

    // ============================================================
    // Test per POST /register - register_user
    // ============================================================

    #[tokio::test]
    async fn test_register_then_login() {
        let server = create_test_server(create_test_state());

        let registered = register(&server, "mario@example.com").await;
        assert!(!registered.access_token.is_empty());
        assert_eq!(registered.user_token.email, "mario@example.com");
        assert_eq!(registered.expires_in, 3600);

        let token = login(&server, "mario@example.com").await;
        let claims = decode_jwt(&token, &test_jwt_settings()).unwrap().claims;
        assert_eq!(claims.sub, registered.user_token.id);
        assert_eq!(claims.email, "mario@example.com");
    }

    #[tokio::test]
    async fn test_register_malformed_email_creates_nothing() {
        let state = create_test_state();
        let server = create_test_server(state.clone());

        let response = server
            .post("/register")
            .json(&json!({
                "email": "mario.example.com",
                "password": STRONG_PASSWORD,
                "confirm_password": STRONG_PASSWORD
            }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Validation error");
        assert!(body["errors"].get("email").is_some(), "email should be reported");

        // nessuna identità creata: il login fallisce
        let login = server
            .post("/login")
            .json(&json!({ "email": "mario.example.com", "password": STRONG_PASSWORD }))
            .await;
        login.assert_status_bad_request();
        assert!(
            state
                .identity
                .verify_credentials("mario.example.com", STRONG_PASSWORD)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let server = create_test_server(create_test_state());
        register(&server, "mario@example.com").await;

        let response = server
            .post("/register")
            .json(&json!({
                "email": "Mario@Example.com",
                "password": STRONG_PASSWORD,
                "confirm_password": STRONG_PASSWORD
            }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert!(body["errors"].get("DuplicateEmail").is_some());
    }

    #[tokio::test]
    async fn test_register_weak_password() {
        let server = create_test_server(create_test_state());

        let response = server
            .post("/register")
            .json(&json!({
                "email": "mario@example.com",
                "password": "password",
                "confirm_password": "password"
            }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert!(body["errors"].get("PasswordRequiresDigit").is_some());
        assert!(body["errors"].get("PasswordRequiresUpper").is_some());
    }

    #[tokio::test]
    async fn test_register_password_confirmation_mismatch() {
        let server = create_test_server(create_test_state());

        let response = server
            .post("/register")
            .json(&json!({
                "email": "mario@example.com",
                "password": STRONG_PASSWORD,
                "confirm_password": "Passw0rd?"
            }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert!(body["errors"].get("confirm_password").is_some());
    }

    #[tokio::test]
    async fn test_register_empty_body() {
        let server = create_test_server(create_test_state());

        let response = server.post("/register").json(&json!({})).await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert!(body["errors"].get("email").is_some());
        assert!(body["errors"].get("password").is_some());
    }

    #[tokio::test]
    async fn test_register_malformed_json() {
        let server = create_test_server(create_test_state());

        let response = server
            .post("/register")
            .text("{ not json")
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Invalid JSON body");
    }

    // ============================================================
    // Test per POST /login - login_user
    // ============================================================

    #[tokio::test]
    async fn test_login_wrong_password() {
        let server = create_test_server(create_test_state());
        register(&server, "mario@example.com").await;

        let response = server
            .post("/login")
            .json(&json!({ "email": "mario@example.com", "password": "Wr0ng!pass" }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let server = create_test_server(create_test_state());

        let response = server
            .post("/login")
            .json(&json!({ "email": "nobody@example.com", "password": STRONG_PASSWORD }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_login_missing_password() {
        let server = create_test_server(create_test_state());

        let response = server
            .post("/login")
            .json(&json!({ "email": "mario@example.com" }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert!(body["errors"].get("password").is_some());
    }

    #[tokio::test]
    async fn test_login_token_carries_granted_claims() {
        let state = create_test_state();
        let server = create_test_server(state.clone());
        register(&server, "anna@example.com").await;

        let user = state
            .identity
            .verify_credentials("anna@example.com", STRONG_PASSWORD)
            .await
            .unwrap();
        state
            .identity
            .add_claim(
                &user,
                supplier_registry::entities::UserClaim::new("DeleteSupplier", "true"),
            )
            .await
            .unwrap();

        let response = server
            .post("/login")
            .json(&json!({ "email": "anna@example.com", "password": STRONG_PASSWORD }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["user_token"]["claims"][0]["type"], "DeleteSupplier");
        assert_eq!(body["user_token"]["claims"][0]["value"], "true");

        let token = body["access_token"].as_str().unwrap();
        let claims = decode_jwt(token, &test_jwt_settings()).unwrap().claims;
        assert!(claims.has_claim("DeleteSupplier"));
    }
}
