// src/db/attachment_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::begin_scoped, error::AppError},
    models::attachments::{MediaFile, NewMediaFile, Signature},
};

/// Fotos e assinaturas. A posse vem da OS: o RLS só enxerga anexos de OS
/// do dono da sessão.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    async fn list_media(&self, owner_id: Uuid, order_id: Uuid) -> Result<Vec<MediaFile>, AppError>;

    async fn add_media(&self, owner_id: Uuid, order_id: Uuid, file: NewMediaFile) -> Result<MediaFile, AppError>;

    async fn delete_media(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    async fn list_signatures(&self, owner_id: Uuid, order_id: Uuid) -> Result<Vec<Signature>, AppError>;

    async fn add_signature(&self, owner_id: Uuid, order_id: Uuid, signature_url: &str) -> Result<Signature, AppError>;

    async fn delete_signature(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgAttachmentRepository {
    pool: PgPool,
}

impl PgAttachmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttachmentRepository for PgAttachmentRepository {
    async fn list_media(&self, owner_id: Uuid, order_id: Uuid) -> Result<Vec<MediaFile>, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let files = sqlx::query_as::<_, MediaFile>(
            "SELECT * FROM media_files WHERE service_order_id = $1 ORDER BY created_at ASC",
        )
        .bind(order_id)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(files)
    }

    async fn add_media(&self, owner_id: Uuid, order_id: Uuid, file: NewMediaFile) -> Result<MediaFile, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let created = sqlx::query_as::<_, MediaFile>(
            r#"
            INSERT INTO media_files (service_order_id, file_url, file_type, file_name)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(&file.file_url)
        .bind(&file.file_type)
        .bind(&file.file_name)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn delete_media(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let result = sqlx::query("DELETE FROM media_files WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_signatures(&self, owner_id: Uuid, order_id: Uuid) -> Result<Vec<Signature>, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let signatures = sqlx::query_as::<_, Signature>(
            "SELECT * FROM signatures WHERE service_order_id = $1 ORDER BY created_at ASC",
        )
        .bind(order_id)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(signatures)
    }

    async fn add_signature(&self, owner_id: Uuid, order_id: Uuid, signature_url: &str) -> Result<Signature, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let created = sqlx::query_as::<_, Signature>(
            "INSERT INTO signatures (service_order_id, signature_url) VALUES ($1, $2) RETURNING *",
        )
        .bind(order_id)
        .bind(signature_url)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn delete_signature(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tx = begin_scoped(&self.pool, owner_id).await?;
        let result = sqlx::query("DELETE FROM signatures WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
