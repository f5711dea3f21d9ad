//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Ogni repository gestisce le operazioni di database per una specifica entità.
//! Le query sono scritte con `sqlx::query` / `sqlx::query_as` (verificate a runtime),
//! così il crate compila anche senza un database raggiungibile.

pub mod memory;
pub mod supplier;
pub mod traits;
pub mod user;

use sqlx::MySqlPool;

// alias di tipo per il pool, per semplificare lo switch in caso in cui vogliamo usare un altro db
pub type PoolType = MySqlPool;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, IdentityStore, Read, ReadAll, SupplierStore, Update};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use memory::{MemorySupplierRepository, MemoryUserRepository};
pub use supplier::SupplierRepository;
pub use user::UserRepository;
