// src/db/service_order_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{begin_scoped, violated_constraint},
        error::AppError,
    },
    models::service_orders::{
        NewServiceOrder, OrderFilter, ServiceOrder, ServiceOrderDetail, ServiceOrderPatch,
        ServiceOrderRow,
    },
};

// JOIN usado pela listagem e pelo detalhe
const DETAIL_SELECT: &str = r#"
    SELECT
        so.*,
        c.name AS client_name, c.phone AS client_phone,
        c.email AS client_email, c.address AS client_address,
        e.type AS equipment_type, e.brand AS equipment_brand,
        e.model AS equipment_model, e.serial_number AS equipment_serial_number,
        p.name AS technician_name
    FROM service_orders so
    JOIN clients c ON c.id = so.client_id
    JOIN equipments e ON e.id = so.equipment_id
    JOIN profiles p ON p.id = so.technician_id
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceOrderRepository: Send + Sync {
    /// OS do dono com os dados relacionados, mais novas primeiro.
    async fn list(&self, owner_id: Uuid, filter: OrderFilter) -> Result<Vec<ServiceOrderDetail>, AppError>;

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<ServiceOrderDetail>, AppError>;

    async fn create(&self, owner_id: Uuid, order: NewServiceOrder) -> Result<ServiceOrder, AppError>;

    async fn update(&self, owner_id: Uuid, id: Uuid, patch: ServiceOrderPatch) -> Result<Option<ServiceOrder>, AppError>;

    /// Fotos e assinaturas caem em cascata.
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    async fn count_for_client(&self, owner_id: Uuid, client_id: Uuid) -> Result<i64, AppError>;
}

#[derive(Clone)]
pub struct PgServiceOrderRepository {
    pool: PgPool,
}

impl PgServiceOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_reference_error(e: sqlx::Error) -> AppError {
    match violated_constraint(&e).as_deref() {
        Some("service_orders_client_owner_fkey") => AppError::ClientNotFound,
        Some("service_orders_equipment_client_fkey") => AppError::EquipmentClientMismatch,
        Some("service_orders_technician_id_fkey") => AppError::TechnicianNotFound,
        Some("service_orders_value_check") => AppError::InvalidValue,
        _ => e.into(),
    }
}

#[async_trait]
impl ServiceOrderRepository for PgServiceOrderRepository {
    async fn list(&self, owner_id: Uuid, filter: OrderFilter) -> Result<Vec<ServiceOrderDetail>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(DETAIL_SELECT);
        qb.push(" WHERE so.owner_id = ").push_bind(owner_id);
        if let Some(status) = filter.status {
            qb.push(" AND so.status = ").push_bind(status);
        }
        if let Some(client_id) = filter.client_id {
            qb.push(" AND so.client_id = ").push_bind(client_id);
        }
        qb.push(" ORDER BY so.created_at DESC");

        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let rows = qb.build_query_as::<ServiceOrderRow>().fetch_all(&mut *tx).await?;
        tx.commit().await?;
        Ok(rows.into_iter().map(ServiceOrderDetail::from).collect())
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<ServiceOrderDetail>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(DETAIL_SELECT);
        qb.push(" WHERE so.id = ")
            .push_bind(id)
            .push(" AND so.owner_id = ")
            .push_bind(owner_id);

        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let row = qb.build_query_as::<ServiceOrderRow>().fetch_optional(&mut *tx).await?;
        tx.commit().await?;
        Ok(row.map(ServiceOrderDetail::from))
    }

    async fn create(&self, owner_id: Uuid, order: NewServiceOrder) -> Result<ServiceOrder, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let created = sqlx::query_as::<_, ServiceOrder>(
            r#"
            INSERT INTO service_orders (
                owner_id, client_id, equipment_id, technician_id,
                problem_description, solution_description, value, status, payment_status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(order.client_id)
        .bind(order.equipment_id)
        .bind(order.technician_id)
        .bind(&order.problem_description)
        .bind(&order.solution_description)
        .bind(order.value)
        .bind(order.status)
        .bind(order.payment_status)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_reference_error)?;
        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, owner_id: Uuid, id: Uuid, patch: ServiceOrderPatch) -> Result<Option<ServiceOrder>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE service_orders SET updated_at = NOW()");
        if let Some(client_id) = patch.client_id {
            qb.push(", client_id = ").push_bind(client_id);
        }
        if let Some(equipment_id) = patch.equipment_id {
            qb.push(", equipment_id = ").push_bind(equipment_id);
        }
        if let Some(technician_id) = patch.technician_id {
            qb.push(", technician_id = ").push_bind(technician_id);
        }
        if let Some(problem) = patch.problem_description {
            qb.push(", problem_description = ").push_bind(problem);
        }
        if let Some(solution) = patch.solution_description {
            qb.push(", solution_description = ").push_bind(solution);
        }
        if let Some(value) = patch.value {
            qb.push(", value = ").push_bind(value);
        }
        if let Some(status) = patch.status {
            qb.push(", status = ").push_bind(status);
        }
        if let Some(payment_status) = patch.payment_status {
            qb.push(", payment_status = ").push_bind(payment_status);
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" AND owner_id = ")
            .push_bind(owner_id)
            .push(" RETURNING *");

        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let order = qb
            .build_query_as::<ServiceOrder>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_reference_error)?;
        tx.commit().await?;
        Ok(order)
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let result = sqlx::query("DELETE FROM service_orders WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_for_client(&self, owner_id: Uuid, client_id: Uuid) -> Result<i64, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM service_orders WHERE owner_id = $1 AND client_id = $2",
        )
        .bind(owner_id)
        .bind(client_id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(count)
    }
}
