// src/db/client_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{begin_scoped, violated_constraint},
        error::AppError,
    },
    models::clients::{Client, ClientPatch, NewClient},
};

/// Todas as consultas filtram por `owner_id` além do RLS.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Clientes do dono, em ordem alfabética.
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Client>, AppError>;

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Client>, AppError>;

    async fn create(&self, owner_id: Uuid, client: NewClient) -> Result<Client, AppError>;

    async fn update(&self, owner_id: Uuid, id: Uuid, patch: ClientPatch) -> Result<Option<Client>, AppError>;

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Client>, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let clients = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE owner_id = $1 ORDER BY name ASC",
        )
        .bind(owner_id)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(clients)
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Client>, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let client = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(client)
    }

    async fn create(&self, owner_id: Uuid, client: NewClient) -> Result<Client, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let created = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (owner_id, name, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, owner_id: Uuid, id: Uuid, patch: ClientPatch) -> Result<Option<Client>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE clients SET updated_at = NOW()");
        if let Some(name) = patch.name {
            qb.push(", name = ").push_bind(name);
        }
        if let Some(email) = patch.email {
            qb.push(", email = ").push_bind(email);
        }
        if let Some(phone) = patch.phone {
            qb.push(", phone = ").push_bind(phone);
        }
        if let Some(address) = patch.address {
            qb.push(", address = ").push_bind(address);
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" AND owner_id = ")
            .push_bind(owner_id)
            .push(" RETURNING *");

        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let client = qb.build_query_as::<Client>().fetch_optional(&mut *tx).await?;
        tx.commit().await?;
        Ok(client)
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let result = sqlx::query("DELETE FROM clients WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await
            // As FKs RESTRICT seguram inserts concorrentes às checagens do serviço
            .map_err(|e| match violated_constraint(&e).as_deref() {
                Some("equipments_client_owner_fkey") => AppError::ClientHasEquipment,
                Some("service_orders_client_owner_fkey") => AppError::ClientHasServiceOrders,
                _ => e.into(),
            })?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
