// src/services/technician_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProfileRepository, UserRepository},
    models::{
        auth::{SessionContext, normalize_email},
        technicians::{CreateTechnicianPayload, Profile, ProfilePatch},
    },
    services::auth::hash_password,
};

/// Administração da equipe. Toda operação exige sessão `admin`, mesmo com
/// o extrator já tendo barrado as outras, e só alcança os técnicos que o
/// próprio admin cadastrou.
#[derive(Clone)]
pub struct TechnicianService {
    user_repo: Arc<dyn UserRepository>,
    profile_repo: Arc<dyn ProfileRepository>,
    bcrypt_cost: u32,
}

impl TechnicianService {
    pub fn new(user_repo: Arc<dyn UserRepository>, profile_repo: Arc<dyn ProfileRepository>, bcrypt_cost: u32) -> Self {
        Self { user_repo, profile_repo, bcrypt_cost }
    }

    pub async fn list(&self, session: &SessionContext) -> Result<Vec<Profile>, AppError> {
        ensure_admin(session)?;
        self.profile_repo.list_managed(session.owner_id(), session.profile.id).await
    }

    pub async fn get(&self, session: &SessionContext, id: Uuid) -> Result<Profile, AppError> {
        ensure_admin(session)?;
        self.find_technician(session, id).await
    }

    /// Conta + perfil `technician` numa transação só.
    pub async fn create(&self, session: &SessionContext, payload: CreateTechnicianPayload) -> Result<Profile, AppError> {
        ensure_admin(session)?;

        let email = normalize_email(&payload.email);
        let hashed_password = hash_password(&payload.password, self.bcrypt_cost).await?;
        let (_, profile) = self
            .user_repo
            .create_account(
                Some(session.owner_id()),
                &email,
                &hashed_password,
                payload.profile(session.profile.id),
            )
            .await?;

        tracing::info!(technician_id = %profile.id, "técnico cadastrado");
        Ok(profile)
    }

    pub async fn update(&self, session: &SessionContext, id: Uuid, patch: ProfilePatch) -> Result<Profile, AppError> {
        ensure_admin(session)?;
        self.find_technician(session, id).await?;
        self.profile_repo
            .update(session.owner_id(), id, patch)
            .await?
            .ok_or(AppError::TechnicianNotFound)
    }

    /// Ativo ↔ inativo, sem confirmação.
    pub async fn toggle_status(&self, session: &SessionContext, id: Uuid) -> Result<Profile, AppError> {
        ensure_admin(session)?;
        let technician = self.find_technician(session, id).await?;
        self.profile_repo
            .update(session.owner_id(), id, ProfilePatch::status(technician.status.toggled()))
            .await?
            .ok_or(AppError::TechnicianNotFound)
    }

    /// Troca a senha e derruba as sessões abertas do técnico.
    pub async fn reset_password(&self, session: &SessionContext, id: Uuid, new_password: &str) -> Result<(), AppError> {
        ensure_admin(session)?;
        let technician = self.find_technician(session, id).await?;

        let hashed_password = hash_password(new_password, self.bcrypt_cost).await?;
        self.user_repo.set_password(technician.user_id, &hashed_password).await?;
        self.user_repo.revoke_all_sessions(technician.user_id).await?;

        tracing::info!(technician_id = %id, "senha do técnico redefinida");
        Ok(())
    }

    pub async fn delete(&self, session: &SessionContext, id: Uuid) -> Result<(), AppError> {
        ensure_admin(session)?;
        let technician = self.find_technician(session, id).await?;

        if !self.user_repo.delete_account(technician.user_id).await? {
            return Err(AppError::TechnicianNotFound);
        }
        tracing::info!(technician_id = %id, "técnico removido");
        Ok(())
    }

    // Técnico de outra assistência responde como inexistente
    async fn find_technician(&self, session: &SessionContext, id: Uuid) -> Result<Profile, AppError> {
        self.profile_repo
            .find_managed(session.owner_id(), session.profile.id, id)
            .await?
            .filter(Profile::is_assignable)
            .ok_or(AppError::TechnicianNotFound)
    }
}

fn ensure_admin(session: &SessionContext) -> Result<(), AppError> {
    if !session.is_admin() {
        return Err(AppError::AdminOnly);
    }
    Ok(())
}
