//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Autenticazione e JWT
//! - Identity service e policy di autorizzazione
//! - Configurazione
//! - Gestione errori ed estrattori
//! - Stato applicazione

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod identity;
pub mod policy;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{Claims, JwtSettings, authentication_middleware, decode_jwt, issue_token};
pub use config::Config;
pub use error::AppError;
pub use extract::{JsonBody, UuidPath, ValidatedJson};
pub use identity::{IdentityError, IdentityService};
pub use policy::{DELETE_SUPPLIER, Decision, Policy, authorization_middleware};
pub use state::AppState;
