// src/db/user_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{is_unique_violation, violated_constraint},
        error::AppError,
    },
    models::{
        auth::{Session, User},
        technicians::{NewProfile, Profile},
    },
};

/// Contas (tabela `users`) e sessões. Essas tabelas não têm RLS: só o
/// serviço de autenticação chega aqui.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Cria a conta e o perfil na mesma transação. `actor` é quem está
    /// criando (o admin); `None` no auto-cadastro.
    async fn create_account(
        &self,
        actor: Option<Uuid>,
        email: &str,
        password_hash: &str,
        profile: NewProfile,
    ) -> Result<(User, Profile), AppError>;

    async fn set_password(&self, user_id: Uuid, password_hash: &str) -> Result<(), AppError>;

    /// Apaga a conta; perfil e sessões caem em cascata.
    async fn delete_account(&self, user_id: Uuid) -> Result<bool, AppError>;

    async fn create_session(&self, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<Session, AppError>;

    async fn find_session(&self, id: Uuid) -> Result<Option<Session>, AppError>;

    async fn revoke_session(&self, id: Uuid) -> Result<(), AppError>;

    async fn revoke_all_sessions(&self, user_id: Uuid) -> Result<(), AppError>;
}

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    async fn create_account(
        &self,
        actor: Option<Uuid>,
        email: &str,
        password_hash: &str,
        profile: NewProfile,
    ) -> Result<(User, Profile), AppError> {
        let mut tx = self.pool.begin().await?;

        // Tratamento específico para e-mails duplicados
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::EmailAlreadyExists;
            }
            e.into()
        })?;

        // O INSERT em `profiles` passa pelo RLS: ou é o próprio usuário, ou um admin.
        sqlx::query("SELECT set_config('app.user_id', $1, true)")
            .bind(actor.unwrap_or(user.id).to_string())
            .execute(&mut *tx)
            .await?;

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (user_id, name, phone, position, user_type, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&profile.name)
        .bind(&profile.phone)
        .bind(&profile.position)
        .bind(profile.user_type)
        .bind(profile.created_by)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((user, profile))
    }

    async fn set_password(&self, user_id: Uuid, password_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }

    async fn delete_account(&self, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match violated_constraint(&e).as_deref() {
                Some("service_orders_technician_id_fkey") => AppError::TechnicianHasOrders,
                _ => e.into(),
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_session(&self, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<Session, AppError> {
        let session = sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (user_id, expires_at) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }

    async fn find_session(&self, id: Uuid) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(session)
    }

    async fn revoke_session(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE sessions SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn revoke_all_sessions(&self, user_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE sessions SET revoked_at = NOW() WHERE user_id = $1 AND revoked_at IS NULL")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
