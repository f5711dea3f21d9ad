use crate::core::{AppError, AppState};
use crate::dtos::{UserResponseDTO, UserTokenDTO};
use crate::entities::{User, UserClaim};
use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Claim type under which roles travel inside the token
pub const ROLE_CLAIM: &str = "role";

/// Registered claim names, user claims with these types are not copied into the token
const RESERVED_CLAIMS: [&str; 9] = [
    "sub", "email", "jti", "nbf", "iat", "exp", "iss", "aud", ROLE_CLAIM,
];

/// Impostazioni per firmare e validare i token
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
    pub audience: String,
}

// struct che codifica il contenuto del token jwt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub jti: Uuid,
    pub nbf: i64,
    pub iat: i64,
    pub exp: i64, // Expiry time of the token
    pub iss: String,
    pub aud: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role: Vec<String>,
    /// User claims, one top-level entry per claim type
    #[serde(flatten)]
    pub user_claims: BTreeMap<String, String>,
}

impl Claims {
    pub fn has_claim(&self, claim_type: &str) -> bool {
        self.user_claims.contains_key(claim_type)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role.iter().any(|r| r == role)
    }
}

/// Issues a signed token for `user` carrying its claims and roles.
///
/// When the same claim type appears more than once the last value wins.
#[instrument(skip(settings, user, claims, roles), fields(user_id = %user.user_id))]
pub fn issue_token(
    settings: &JwtSettings,
    user: &User,
    claims: &[UserClaim],
    roles: &[String],
) -> Result<UserResponseDTO, jsonwebtoken::errors::Error> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let expire = Duration::hours(settings.expiration_hours);

    let user_claims: BTreeMap<String, String> = claims
        .iter()
        .filter(|c| !RESERVED_CLAIMS.contains(&c.claim_type.as_str()))
        .map(|c| (c.claim_type.clone(), c.claim_value.clone()))
        .collect();

    let token_claims = Claims {
        sub: user.user_id,
        email: user.email.clone(),
        jti: Uuid::new_v4(),
        nbf: now.timestamp(),
        iat: now.timestamp(),
        exp: (now + expire).timestamp(),
        iss: settings.issuer.clone(),
        aud: settings.audience.clone(),
        role: roles.to_vec(),
        user_claims,
    };

    let access_token = encode(
        &Header::default(),
        &token_claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .map_err(|e| {
        error!("Failed to encode JWT token: {:?}", e);
        e
    })?;
    info!("JWT token encoded successfully");

    let mut response_claims: Vec<UserClaim> = claims.to_vec();
    response_claims.extend(roles.iter().map(|r| UserClaim::new(ROLE_CLAIM, r.clone())));

    Ok(UserResponseDTO {
        access_token,
        expires_in: expire.num_seconds(),
        user_token: UserTokenDTO {
            id: user.user_id,
            email: user.email.clone(),
            claims: response_claims,
        },
    })
}

/// Verifies signature, expiry, not-before, issuer and audience
#[instrument(skip(jwt_token, settings))]
pub fn decode_jwt(
    jwt_token: &str,
    settings: &JwtSettings,
) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    debug!("Decoding JWT token");
    let mut validation = Validation::default();
    validation.validate_nbf = true;
    validation.set_issuer(&[settings.issuer.as_str()]);
    validation.set_audience(&[settings.audience.as_str()]);

    decode::<Claims>(
        jwt_token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &validation,
    )
    .map(|data| {
        debug!("JWT token decoded successfully for user: {}", data.claims.sub);
        data
    })
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        e
    })
}

/// Estrae il token dall'header `Authorization: Bearer <token>`
fn bearer_token(req: &Request) -> Result<&str, AppError> {
    let auth_header = match req.headers().get(http::header::AUTHORIZATION) {
        Some(header) => header.to_str().map_err(|_| {
            warn!("Invalid authorization header format");
            AppError::unauthorized("Invalid authorization header")
        })?,
        None => {
            warn!("Missing authorization header");
            return Err(AppError::unauthorized("Please add the JWT token to the header"));
        }
    };

    let mut header = auth_header.split_whitespace();
    match (header.next(), header.next(), header.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => {
            warn!("Authorization header is not a bearer token");
            Err(AppError::unauthorized("Authorization header must be 'Bearer <token>'"))
        }
    }
}

/// Valida il bearer token e inserisce le `Claims` nelle extension della richiesta.
///
/// Nessuna query al database: il token basta a sé stesso.
#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let token = bearer_token(&req)?;

    let token_data = decode_jwt(token, &state.jwt)
        .map_err(|_| AppError::unauthorized("Unable to decode token"))?;

    info!("User authenticated: {}", token_data.claims.email);
    req.extensions_mut().insert(token_data.claims);
    Ok(next.run(req).await)
}
