//! Supplier DTOs - Data Transfer Objects per fornitori

use crate::entities::Supplier;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    /// Cifre e i separatori usati nei documenti fiscali (12.345.678/0001-90), almeno una cifra
    static ref DOCUMENT: Regex = Regex::new(r"^[./-]*[0-9][0-9./-]*$").unwrap();
}

/// Gli spazi iniziali e finali non contano: si valida e si salva il valore ripulito
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Payload for creating or fully replacing a supplier.
///
/// Every field defaults when missing so that absent values are reported by
/// the validator (400 with field detail) instead of by the JSON extractor.
/// Text fields arrive already trimmed, so the length limits apply to what is stored.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct SupplierDTO {
    #[serde(default)]
    pub id: Option<Uuid>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(
        min = 1,
        max = 200,
        message = "The name field is required and must have at most 200 characters"
    ))]
    pub name: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        length(min = 1, max = 18, message = "The document field is required and must have at most 18 characters"),
        regex(path = *DOCUMENT, message = "The document field must contain digits and may only use '.', '/' and '-'")
    )]
    pub document: String,

    #[serde(default)]
    pub active: bool,
}

impl SupplierDTO {
    /// Builds the entity stored under `id`
    pub fn into_supplier(self, id: Uuid) -> Supplier {
        Supplier {
            id,
            name: self.name,
            document: self.document,
            active: self.active,
        }
    }
}
