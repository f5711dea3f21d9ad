//! Auth services - Registrazione e login utenti

use crate::core::{AppError, AppState, ValidatedJson, issue_token};
use crate::dtos::{LoginUserDTO, RegisterUserDTO, UserResponseDTO};
use crate::entities::User;
use axum::extract::{Json, State};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Carica claim e ruoli dell'utente e firma il token
async fn build_user_response(state: &AppState, user: &User) -> Result<UserResponseDTO, AppError> {
    let claims = state.identity.get_claims(user).await?;
    let roles = state.identity.get_roles(user).await?;
    debug!("Issuing token with {} claims and {} roles", claims.len(), roles.len());
    Ok(issue_token(&state.jwt, user, &claims, &roles)?)
}

#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<RegisterUserDTO>,
) -> Result<Json<UserResponseDTO>, AppError> {
    // 1. Il DTO è già validato (email, lunghezza password, conferma)
    // 2. L'identity service rifiuta email duplicate e password deboli
    // 3. Se l'emissione del token fallisce l'utente resta creato: nessuna compensazione
    let user = state
        .identity
        .create_identity(&body.email, &body.password)
        .await?;
    info!("User registered");

    let response = build_user_response(&state, &user).await?;
    Ok(Json(response))
}

#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<LoginUserDTO>,
) -> Result<Json<UserResponseDTO>, AppError> {
    let user = state
        .identity
        .verify_credentials(&body.email, &body.password)
        .await?;
    info!("User logged in");

    let response = build_user_response(&state, &user).await?;
    Ok(Json(response))
}
