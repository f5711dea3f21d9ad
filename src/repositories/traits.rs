//! Common repository traits
//!
//! This module defines generic interfaces for database operations, plus the
//! per-entity store traits that `AppState` holds behind `Arc<dyn ...>` so the
//! storage technology can be swapped (MySQL in production, memory in tests).

use crate::dtos::user::CreateUserDTO;
use crate::entities::{Supplier, User, UserClaim};
use async_trait::async_trait;
use uuid::Uuid;

/// Trait for creating new entities in the database
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity
/// * `CreateDTO` - Data used for the insertion
#[async_trait]
pub trait Create<Entity, CreateDTO> {
    /// Creates a new entity in the database
    ///
    /// # Returns
    /// * `Ok(Entity)` - Created entity as stored
    /// * `Err(sqlx::Error)` - Error during insertion
    async fn create(&self, data: &CreateDTO) -> Result<Entity, sqlx::Error>;
}

/// Trait for reading a single entity by primary key
///
/// # Type Parameters
/// * `Entity` - Type of the entity to read
/// * `Id` - Type of the primary key (e.g. `Uuid`)
#[async_trait]
pub trait Read<Entity, Id> {
    /// Reads an entity from the database by its primary key
    ///
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that ID
    /// * `Err(sqlx::Error)` - Error during reading
    async fn read(&self, id: &Id) -> Result<Option<Entity>, sqlx::Error>;
}

/// Trait for reading every entity of a table
#[async_trait]
pub trait ReadAll<Entity> {
    /// Reads all entities, in a stable order chosen by the implementation
    async fn read_all(&self) -> Result<Vec<Entity>, sqlx::Error>;
}

/// Trait for replacing existing entities
///
/// # Type Parameters
/// * `UpdateDTO` - Full replacement data (no partial merge)
/// * `Id` - Type of the primary key
#[async_trait]
pub trait Update<UpdateDTO, Id> {
    /// Replaces the entity stored under `id`
    ///
    /// # Returns
    /// * `Ok(n)` - Number of rows affected (0 when nothing matched)
    /// * `Err(sqlx::Error)` - Error during update
    async fn update(&self, id: &Id, data: &UpdateDTO) -> Result<u64, sqlx::Error>;
}

/// Trait for deleting entities
///
/// # Type Parameters
/// * `Id` - Type of the primary key
#[async_trait]
pub trait Delete<Id> {
    /// Deletes an entity from the database
    ///
    /// # Returns
    /// * `Ok(n)` - Number of rows affected
    /// * `Err(sqlx::Error)` - Error during deletion
    async fn delete(&self, id: &Id) -> Result<u64, sqlx::Error>;
}

/// Everything the HTTP layer needs from a supplier store
pub trait SupplierStore:
    Create<Supplier, Supplier>
    + Read<Supplier, Uuid>
    + ReadAll<Supplier>
    + Update<Supplier, Uuid>
    + Delete<Uuid>
    + Send
    + Sync
{
}

impl<T> SupplierStore for T where
    T: Create<Supplier, Supplier>
        + Read<Supplier, Uuid>
        + ReadAll<Supplier>
        + Update<Supplier, Uuid>
        + Delete<Uuid>
        + Send
        + Sync
{
}

/// Persistence of identities, their claims and their roles
#[async_trait]
pub trait IdentityStore: Create<User, CreateUserDTO> + Send + Sync {
    /// Exact match on the (normalized) email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;

    async fn claims_for(&self, user_id: &Uuid) -> Result<Vec<UserClaim>, sqlx::Error>;

    async fn roles_for(&self, user_id: &Uuid) -> Result<Vec<String>, sqlx::Error>;

    async fn add_claim(&self, user_id: &Uuid, claim: &UserClaim) -> Result<(), sqlx::Error>;
}
