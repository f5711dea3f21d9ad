//! Application State - Stato globale dell'applicazione
//!
//! Contiene i repository, l'identity service e le impostazioni JWT
//! condivisi tra tutte le route e i middleware.

use crate::core::auth::JwtSettings;
use crate::core::identity::IdentityService;
use crate::repositories::{
    IdentityStore, MemorySupplierRepository, MemoryUserRepository, PoolType, SupplierRepository,
    SupplierStore, UserRepository,
};
use std::sync::Arc;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione dei fornitori
    pub suppliers: Arc<dyn SupplierStore>,

    /// Creazione utenti, verifica credenziali, claim e ruoli
    pub identity: IdentityService,

    /// Impostazioni per firmare e validare i token JWT
    pub jwt: JwtSettings,
}

impl AppState {
    /// Crea una nuova istanza di AppState con i repository MySQL
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni MySQL condiviso
    /// * `jwt` - Impostazioni per la firma dei token JWT
    /// * `hash_cost` - Costo bcrypt per le nuove password
    pub fn new(pool: PoolType, jwt: JwtSettings, hash_cost: u32) -> Self {
        Self::with_stores(
            Arc::new(SupplierRepository::new(pool.clone())),
            Arc::new(UserRepository::new(pool)),
            jwt,
            hash_cost,
        )
    }

    /// AppState senza database, tutto in memoria
    pub fn in_memory(jwt: JwtSettings, hash_cost: u32) -> Self {
        Self::with_stores(
            Arc::new(MemorySupplierRepository::new()),
            Arc::new(MemoryUserRepository::new()),
            jwt,
            hash_cost,
        )
    }

    pub fn with_stores(
        suppliers: Arc<dyn SupplierStore>,
        users: Arc<dyn IdentityStore>,
        jwt: JwtSettings,
        hash_cost: u32,
    ) -> Self {
        Self {
            suppliers,
            identity: IdentityService::new(users, hash_cost),
            jwt,
        }
    }
}
