//! Estrattori (body JSON, id nel path) che rispondono 400 con il formato di `AppError`

use crate::core::AppError;
use axum::{
    extract::{FromRequest, FromRequestParts, Json, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

/// Like `Json<T>`, but a malformed body becomes a 400 `AppError` instead of axum's 415/422
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            warn!("Rejected JSON body: {}", rejection.body_text());
            AppError::bad_request("Invalid JSON body").with_details(rejection.body_text())
        })?;
        Ok(JsonBody(value))
    }
}

/// `JsonBody<T>` followed by `validator` checks
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        value.validate().map_err(|e| {
            warn!("Validation failed: {}", e);
            AppError::from(e)
        })?;
        Ok(ValidatedJson(value))
    }
}

/// `Path<Uuid>` whose rejection is a JSON `AppError` instead of axum's plain text
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                warn!("Rejected path id: {}", rejection.body_text());
                AppError::bad_request("Invalid id").with_details(rejection.body_text())
            })?;
        Ok(UuidPath(id))
    }
}
