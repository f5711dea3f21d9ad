//! Supplier entity - Entità fornitore

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    /// Tax document number (CPF/CNPJ style, digits with optional separators)
    pub document: String,
    pub active: bool,
}
