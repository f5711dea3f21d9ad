//! Repository in memoria, basati su DashMap
//!
//! Stessa interfaccia dei repository MySQL: li usano i test di integrazione
//! e l'avvio locale senza database.

use super::{Create, Delete, IdentityStore, Read, ReadAll, Update};
use crate::dtos::CreateUserDTO;
use crate::entities::{Supplier, User, UserClaim};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use sqlx::Error;
use uuid::Uuid;

#[derive(Default)]
pub struct MemorySupplierRepository {
    rows: DashMap<Uuid, Supplier>,
}

impl MemorySupplierRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl Create<Supplier, Supplier> for MemorySupplierRepository {
    async fn create(&self, data: &Supplier) -> Result<Supplier, Error> {
        match self.rows.entry(data.id) {
            Entry::Occupied(_) => Err(Error::Protocol(format!(
                "duplicate primary key {} in suppliers",
                data.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(data.clone());
                Ok(data.clone())
            }
        }
    }
}

#[async_trait]
impl Read<Supplier, Uuid> for MemorySupplierRepository {
    async fn read(&self, id: &Uuid) -> Result<Option<Supplier>, Error> {
        Ok(self.rows.get(id).map(|row| row.value().clone()))
    }
}

#[async_trait]
impl ReadAll<Supplier> for MemorySupplierRepository {
    async fn read_all(&self) -> Result<Vec<Supplier>, Error> {
        let mut suppliers: Vec<Supplier> =
            self.rows.iter().map(|row| row.value().clone()).collect();
        // stesso ordinamento della query MySQL
        suppliers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(suppliers)
    }
}

#[async_trait]
impl Update<Supplier, Uuid> for MemorySupplierRepository {
    async fn update(&self, id: &Uuid, data: &Supplier) -> Result<u64, Error> {
        match self.rows.get_mut(id) {
            Some(mut row) => {
                let row = row.value_mut();
                row.name = data.name.clone();
                row.document = data.document.clone();
                row.active = data.active;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl Delete<Uuid> for MemorySupplierRepository {
    async fn delete(&self, id: &Uuid) -> Result<u64, Error> {
        Ok(self.rows.remove(id).map_or(0, |_| 1))
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    /// Key: email normalizzata
    users: DashMap<String, User>,
    claims: DashMap<Uuid, Vec<UserClaim>>,
    roles: DashMap<Uuid, Vec<String>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Assegna un ruolo (non esiste un endpoint per farlo)
    pub fn add_role(&self, user_id: &Uuid, role: impl Into<String>) {
        let role = role.into();
        let mut roles = self.roles.entry(*user_id).or_default();
        if !roles.contains(&role) {
            roles.push(role);
            roles.sort();
        }
    }
}

#[async_trait]
impl Create<User, CreateUserDTO> for MemoryUserRepository {
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        match self.users.entry(data.email.clone()) {
            Entry::Occupied(_) => Err(Error::Protocol(format!(
                "duplicate email {} in users",
                data.email
            ))),
            Entry::Vacant(slot) => {
                let user = User {
                    user_id: Uuid::new_v4(),
                    username: data.username.clone(),
                    email: data.email.clone(),
                    password: data.password.clone(),
                };
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }
}

#[async_trait]
impl IdentityStore for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        Ok(self.users.get(email).map(|user| user.value().clone()))
    }

    async fn claims_for(&self, user_id: &Uuid) -> Result<Vec<UserClaim>, Error> {
        Ok(self
            .claims
            .get(user_id)
            .map(|claims| claims.value().clone())
            .unwrap_or_default())
    }

    async fn roles_for(&self, user_id: &Uuid) -> Result<Vec<String>, Error> {
        Ok(self
            .roles
            .get(user_id)
            .map(|roles| roles.value().clone())
            .unwrap_or_default())
    }

    async fn add_claim(&self, user_id: &Uuid, claim: &UserClaim) -> Result<(), Error> {
        let mut claims = self.claims.entry(*user_id).or_default();
        if !claims.contains(claim) {
            claims.push(claim.clone());
            claims.sort_by(|a, b| a.claim_type.cmp(&b.claim_type));
        }
        Ok(())
    }
}
