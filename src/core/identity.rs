//! Identity Service - creazione utenti, verifica credenziali, lettura di claim e ruoli
//!
//! Lo storage sta dietro a `IdentityStore`; qui vivono le regole
//! (email normalizzata, policy password, hashing bcrypt).

use crate::dtos::CreateUserDTO;
use crate::entities::{User, UserClaim};
use crate::repositories::{Create, IdentityStore};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// One reason an identity could not be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityFailure {
    pub code: &'static str,
    pub description: String,
}

impl IdentityFailure {
    pub fn new(code: &'static str, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity rejected: {0:?}")]
    Rejected(Vec<IdentityFailure>),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("identity store error: {0}")]
    Store(#[from] sqlx::Error),
}

pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Default password rules: length, digit, lowercase, uppercase, symbol
pub fn check_password_policy(password: &str) -> Vec<IdentityFailure> {
    let mut failures = Vec::new();

    if password.chars().count() < PASSWORD_MIN_LENGTH {
        failures.push(IdentityFailure::new(
            "PasswordTooShort",
            format!("Passwords must be at least {} characters.", PASSWORD_MIN_LENGTH),
        ));
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        failures.push(IdentityFailure::new(
            "PasswordRequiresNonAlphanumeric",
            "Passwords must have at least one non alphanumeric character.",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        failures.push(IdentityFailure::new(
            "PasswordRequiresDigit",
            "Passwords must have at least one digit ('0'-'9').",
        ));
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        failures.push(IdentityFailure::new(
            "PasswordRequiresLower",
            "Passwords must have at least one lowercase ('a'-'z').",
        ));
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        failures.push(IdentityFailure::new(
            "PasswordRequiresUpper",
            "Passwords must have at least one uppercase ('A'-'Z').",
        ));
    }

    failures
}

fn duplicate_email(email: &str) -> IdentityFailure {
    IdentityFailure::new("DuplicateEmail", format!("Email '{}' is already taken.", email))
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct IdentityService {
    store: Arc<dyn IdentityStore>,
    hash_cost: u32,
}

impl IdentityService {
    pub fn new(store: Arc<dyn IdentityStore>, hash_cost: u32) -> Self {
        Self { store, hash_cost }
    }

    /// Creates a new identity whose username is its email.
    ///
    /// Duplicate emails and policy violations are reported together, in the
    /// same `Rejected` list.
    #[instrument(skip(self, password))]
    pub async fn create_identity(&self, email: &str, password: &str) -> Result<User, IdentityError> {
        let email = normalize_email(email);
        let mut failures = Vec::new();

        if self.store.find_by_email(&email).await?.is_some() {
            warn!("Email already registered");
            failures.push(duplicate_email(&email));
        }
        failures.extend(check_password_policy(password));

        if !failures.is_empty() {
            debug!("Identity rejected with {} failures", failures.len());
            return Err(IdentityError::Rejected(failures));
        }

        let password_hash = User::hash_password(password, self.hash_cost)?;
        let created = self
            .store
            .create(&CreateUserDTO {
                username: email.clone(),
                email: email.clone(),
                password: password_hash,
            })
            .await;

        // Una registrazione concorrente può superare il controllo sopra: decide il vincolo UNIQUE
        let user = match created {
            Ok(user) => user,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                warn!("Email registered concurrently");
                return Err(IdentityError::Rejected(vec![duplicate_email(&email)]));
            }
            Err(e) => return Err(e.into()),
        };

        info!("Identity created: {}", user.user_id);
        Ok(user)
    }

    #[instrument(skip(self, password))]
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, IdentityError> {
        let email = normalize_email(email);

        let user = match self.store.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                warn!("Login attempt for unknown email");
                return Err(IdentityError::InvalidCredentials);
            }
        };

        if !user.verify_password(password) {
            warn!("Wrong password for {}", user.user_id);
            return Err(IdentityError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn get_claims(&self, user: &User) -> Result<Vec<UserClaim>, IdentityError> {
        Ok(self.store.claims_for(&user.user_id).await?)
    }

    pub async fn get_roles(&self, user: &User) -> Result<Vec<String>, IdentityError> {
        Ok(self.store.roles_for(&user.user_id).await?)
    }

    #[instrument(skip(self, user), fields(user_id = %user.user_id))]
    pub async fn add_claim(&self, user: &User, claim: UserClaim) -> Result<(), IdentityError> {
        self.store.add_claim(&user.user_id, &claim).await?;
        info!("Claim {} granted", claim.claim_type);
        Ok(())
    }
}
