// src/db/equipment_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{begin_scoped, violated_constraint},
        error::AppError,
    },
    models::equipment::{Equipment, EquipmentFilter, EquipmentListing, EquipmentPatch, NewEquipment},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    /// Equipamentos com o nome do cliente, mais novos primeiro.
    async fn list(&self, owner_id: Uuid, filter: EquipmentFilter) -> Result<Vec<EquipmentListing>, AppError>;

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Equipment>, AppError>;

    async fn create(&self, owner_id: Uuid, equipment: NewEquipment) -> Result<Equipment, AppError>;

    async fn update(&self, owner_id: Uuid, id: Uuid, patch: EquipmentPatch) -> Result<Option<Equipment>, AppError>;

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    async fn count_for_client(&self, owner_id: Uuid, client_id: Uuid) -> Result<i64, AppError>;
}

#[derive(Clone)]
pub struct PgEquipmentRepository {
    pool: PgPool,
}

impl PgEquipmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_reference_error(e: sqlx::Error) -> AppError {
    match violated_constraint(&e).as_deref() {
        Some("equipments_client_owner_fkey") => AppError::ClientNotFound,
        Some("service_orders_equipment_client_fkey") => AppError::EquipmentInUse,
        _ => e.into(),
    }
}

#[async_trait]
impl EquipmentRepository for PgEquipmentRepository {
    async fn list(&self, owner_id: Uuid, filter: EquipmentFilter) -> Result<Vec<EquipmentListing>, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let listings = sqlx::query_as::<_, EquipmentListing>(
            r#"
            SELECT e.*, c.name AS client_name
            FROM equipments e
            JOIN clients c ON c.id = e.client_id
            WHERE e.owner_id = $1
              AND ($2::uuid IS NULL OR e.client_id = $2)
            ORDER BY e.created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(filter.client_id)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(listings)
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Equipment>, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let equipment = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipments WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(equipment)
    }

    async fn create(&self, owner_id: Uuid, equipment: NewEquipment) -> Result<Equipment, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let created = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipments (owner_id, client_id, type, brand, model, serial_number, observations)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(equipment.client_id)
        .bind(&equipment.equipment_type)
        .bind(&equipment.brand)
        .bind(&equipment.model)
        .bind(&equipment.serial_number)
        .bind(&equipment.observations)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_reference_error)?;
        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, owner_id: Uuid, id: Uuid, patch: EquipmentPatch) -> Result<Option<Equipment>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE equipments SET updated_at = NOW()");
        if let Some(client_id) = patch.client_id {
            qb.push(", client_id = ").push_bind(client_id);
        }
        if let Some(equipment_type) = patch.equipment_type {
            qb.push(", type = ").push_bind(equipment_type);
        }
        if let Some(brand) = patch.brand {
            qb.push(", brand = ").push_bind(brand);
        }
        if let Some(model) = patch.model {
            qb.push(", model = ").push_bind(model);
        }
        if let Some(serial_number) = patch.serial_number {
            qb.push(", serial_number = ").push_bind(serial_number);
        }
        if let Some(observations) = patch.observations {
            qb.push(", observations = ").push_bind(observations);
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" AND owner_id = ")
            .push_bind(owner_id)
            .push(" RETURNING *");

        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let equipment = qb
            .build_query_as::<Equipment>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_reference_error)?;
        tx.commit().await?;
        Ok(equipment)
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let result = sqlx::query("DELETE FROM equipments WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await
            .map_err(map_reference_error)?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_for_client(&self, owner_id: Uuid, client_id: Uuid) -> Result<i64, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM equipments WHERE owner_id = $1 AND client_id = $2",
        )
        .bind(owner_id)
        .bind(client_id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(count)
    }
}
