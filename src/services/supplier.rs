//! Supplier services - CRUD dei fornitori

use crate::core::{AppError, AppState, Claims, JsonBody, UuidPath, ValidatedJson};
use crate::dtos::SupplierDTO;
use crate::entities::Supplier;
use crate::repositories::{Create, Delete, Read, ReadAll, Update};
use axum::{
    Extension,
    extract::{Json, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use axum_macros::debug_handler;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

#[instrument(skip(state))]
pub async fn list_suppliers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    let suppliers = state.suppliers.read_all().await?;
    if suppliers.is_empty() {
        warn!("No suppliers stored");
        return Err(AppError::not_found("No suppliers found"));
    }
    info!("Found {} suppliers", suppliers.len());
    Ok(Json(suppliers))
}

#[instrument(skip(state), fields(supplier_id = %id))]
pub async fn get_supplier(
    State(state): State<Arc<AppState>>,
    UuidPath(id): UuidPath, // parametro dalla URL /suppliers/{id}
) -> Result<Json<Supplier>, AppError> {
    debug!("Fetching supplier by ID");
    let supplier = state
        .suppliers
        .read(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Supplier not found"))?;
    Ok(Json(supplier))
}

#[debug_handler]
#[instrument(skip(state, claims, body), fields(user = %claims.email))]
pub async fn create_supplier(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>, // ottenuto dall'autenticazione tramite token jwt
    ValidatedJson(body): ValidatedJson<SupplierDTO>,
) -> Result<impl IntoResponse, AppError> {
    // L'id è opzionale: se il client lo fornisce (e non è nil) lo usiamo
    let id = match body.id.filter(|id| !id.is_nil()) {
        Some(id) => {
            if state.suppliers.read(&id).await?.is_some() {
                warn!("Supplier {} already exists", id);
                return Err(AppError::conflict("Supplier already exists"));
            }
            id
        }
        None => Uuid::new_v4(),
    };

    let created = state.suppliers.create(&body.into_supplier(id)).await?;
    info!("Supplier {} created", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/suppliers/{}", created.id))],
        Json(created),
    ))
}

#[debug_handler]
#[instrument(skip(state, claims, body), fields(supplier_id = %id, user = %claims.email))]
pub async fn update_supplier(
    State(state): State<Arc<AppState>>,
    UuidPath(id): UuidPath,
    Extension(claims): Extension<Claims>,
    JsonBody(body): JsonBody<SupplierDTO>,
) -> Result<StatusCode, AppError> {
    // 1. Il fornitore deve esistere, altrimenti 404 senza toccare lo store
    // 2. Validazione del payload
    // 3. L'id del path è quello che conta: un id diverso nel body è un errore
    // 4. Sostituzione completa del record
    if state.suppliers.read(&id).await?.is_none() {
        warn!("Supplier not found");
        return Err(AppError::not_found("Supplier not found"));
    }

    body.validate()?;

    if let Some(body_id) = body.id.filter(|body_id| !body_id.is_nil() && *body_id != id) {
        warn!("Body id {} does not match path id", body_id);
        return Err(AppError::validation(
            "id",
            "The id in the body must match the id in the path",
        ));
    }

    let rows = state.suppliers.update(&id, &body.into_supplier(id)).await?;
    if rows == 0 {
        warn!("Update affected no rows");
        return Err(AppError::persistence("Error while updating the supplier"));
    }

    info!("Supplier updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Protetto dalla policy `DELETE_SUPPLIER` (vedi router)
#[instrument(skip(state, claims), fields(supplier_id = %id, user = %claims.email))]
pub async fn delete_supplier(
    State(state): State<Arc<AppState>>,
    UuidPath(id): UuidPath,
    Extension(claims): Extension<Claims>,
) -> Result<StatusCode, AppError> {
    if state.suppliers.read(&id).await?.is_none() {
        warn!("Supplier not found");
        return Err(AppError::not_found("Supplier not found"));
    }

    let rows = state.suppliers.delete(&id).await?;
    if rows != 1 {
        warn!("Delete affected {} rows", rows);
        return Err(AppError::persistence("Error while deleting the supplier"));
    }

    info!("Supplier deleted");
    Ok(StatusCode::NO_CONTENT)
}
