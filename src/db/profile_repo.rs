// src/db/profile_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{db_utils::begin_scoped, error::AppError},
    models::technicians::{Profile, ProfilePatch},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Perfil ligado a uma conta.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, AppError>;

    async fn find_by_id(&self, actor: Uuid, id: Uuid) -> Result<Option<Profile>, AppError>;

    /// Perfis do tipo técnico, mais novos primeiro.
    async fn list_technicians(&self, actor: Uuid) -> Result<Vec<Profile>, AppError>;

    /// Técnicos cadastrados pelo perfil `manager_id`.
    async fn list_managed(&self, actor: Uuid, manager_id: Uuid) -> Result<Vec<Profile>, AppError>;

    async fn find_managed(&self, actor: Uuid, manager_id: Uuid, id: Uuid) -> Result<Option<Profile>, AppError>;

    async fn update(&self, actor: Uuid, id: Uuid, patch: ProfilePatch) -> Result<Option<Profile>, AppError>;
}

#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let mut tx = begin_scoped(&self.pool, user_id).await?;
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(profile)
    }

    async fn find_by_id(&self, actor: Uuid, id: Uuid) -> Result<Option<Profile>, AppError> {
        let mut tx = begin_scoped(&self.pool, actor).await?;
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(profile)
    }

    async fn list_technicians(&self, actor: Uuid) -> Result<Vec<Profile>, AppError> {
        let mut tx = begin_scoped(&self.pool, actor).await?;
        let profiles = sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles WHERE user_type = 'technician' ORDER BY created_at DESC",
        )
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(profiles)
    }

    async fn list_managed(&self, actor: Uuid, manager_id: Uuid) -> Result<Vec<Profile>, AppError> {
        let mut tx = begin_scoped(&self.pool, actor).await?;
        let profiles = sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles WHERE user_type = 'technician' AND created_by = $1 ORDER BY created_at DESC",
        )
        .bind(manager_id)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(profiles)
    }

    async fn find_managed(&self, actor: Uuid, manager_id: Uuid, id: Uuid) -> Result<Option<Profile>, AppError> {
        let mut tx = begin_scoped(&self.pool, actor).await?;
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles WHERE id = $1 AND user_type = 'technician' AND created_by = $2",
        )
        .bind(id)
        .bind(manager_id)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(profile)
    }

    async fn update(&self, actor: Uuid, id: Uuid, patch: ProfilePatch) -> Result<Option<Profile>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE profiles SET updated_at = NOW()");
        if let Some(name) = patch.name {
            qb.push(", name = ").push_bind(name);
        }
        if let Some(phone) = patch.phone {
            qb.push(", phone = ").push_bind(phone);
        }
        if let Some(position) = patch.position {
            qb.push(", position = ").push_bind(position);
        }
        if let Some(status) = patch.status {
            qb.push(", status = ").push_bind(status);
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        let mut tx = begin_scoped(&self.pool, actor).await?;
        let profile = qb.build_query_as::<Profile>().fetch_optional(&mut *tx).await?;
        tx.commit().await?;
        Ok(profile)
    }
}
