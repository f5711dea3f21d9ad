//! Supplier registry - libreria del server, espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, Config, auth, config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(configure_auth_routes())
        .merge(configure_supplier_routes(state.clone()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Configura le routes di autenticazione (login, register)
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use crate::services::{login_user, register_user};
    Router::new()
        .route("/login", post(login_user))
        .route("/register", post(register_user))
}

/// Configura le routes per la gestione dei fornitori
fn configure_supplier_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::{DELETE_SUPPLIER, authentication_middleware, authorization_middleware};
    use crate::services::{
        create_supplier, delete_supplier, get_supplier, list_suppliers, update_supplier,
    };

    // Rotte pubbliche (nessun token)
    let public_routes = Router::new()
        .route("/suppliers", get(list_suppliers))
        .route("/suppliers/{id}", get(get_supplier));

    // Rotte che richiedono solo autenticazione
    let authenticated_routes = Router::new()
        .route("/suppliers", post(create_supplier))
        .route("/suppliers/{id}", put(update_supplier))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authentication_middleware,
        ));

    // Rotte che richiedono la claim di cancellazione (autenticazione + policy)
    let restricted_routes = Router::new()
        .route("/suppliers/{id}", delete(delete_supplier))
        .route_layer(middleware::from_fn_with_state(
            DELETE_SUPPLIER,
            authorization_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ));

    public_routes
        .merge(authenticated_routes)
        .merge(restricted_routes)
}
