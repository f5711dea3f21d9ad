//! SupplierRepository - Repository per la gestione dei fornitori

use super::{Create, Delete, PoolType, Read, ReadAll, Update};
use crate::entities::Supplier;
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

pub struct SupplierRepository {
    connection_pool: PoolType,
}

impl SupplierRepository {
    pub fn new(connection_pool: PoolType) -> SupplierRepository {
        Self { connection_pool }
    }
}

#[async_trait]
impl Create<Supplier, Supplier> for SupplierRepository {
    async fn create(&self, data: &Supplier) -> Result<Supplier, Error> {
        sqlx::query("INSERT INTO suppliers (id, name, document, active) VALUES (?, ?, ?, ?)")
            .bind(data.id)
            .bind(&data.name)
            .bind(&data.document)
            .bind(data.active)
            .execute(&self.connection_pool)
            .await?;

        // The id is chosen by the caller, so the inserted row is exactly `data`
        Ok(data.clone())
    }
}

#[async_trait]
impl Read<Supplier, Uuid> for SupplierRepository {
    async fn read(&self, id: &Uuid) -> Result<Option<Supplier>, Error> {
        let supplier = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, document, active FROM suppliers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(supplier)
    }
}

#[async_trait]
impl ReadAll<Supplier> for SupplierRepository {
    async fn read_all(&self) -> Result<Vec<Supplier>, Error> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, document, active FROM suppliers ORDER BY name, id",
        )
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(suppliers)
    }
}

#[async_trait]
impl Update<Supplier, Uuid> for SupplierRepository {
    /// Full replacement. The id column is never written.
    async fn update(&self, id: &Uuid, data: &Supplier) -> Result<u64, Error> {
        let result = sqlx::query(
            "UPDATE suppliers SET name = ?, document = ?, active = ? WHERE id = ?",
        )
        .bind(&data.name)
        .bind(&data.document)
        .bind(data.active)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl Delete<Uuid> for SupplierRepository {
    async fn delete(&self, id: &Uuid) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected())
    }
}
