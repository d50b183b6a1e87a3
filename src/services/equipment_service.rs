// src/services/equipment_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, EquipmentRepository},
    models::{
        auth::SessionContext,
        equipment::{Equipment, EquipmentFilter, EquipmentListing, EquipmentPatch, NewEquipment},
    },
};

#[derive(Clone)]
pub struct EquipmentService {
    equipment_repo: Arc<dyn EquipmentRepository>,
    client_repo: Arc<dyn ClientRepository>,
}

impl EquipmentService {
    pub fn new(equipment_repo: Arc<dyn EquipmentRepository>, client_repo: Arc<dyn ClientRepository>) -> Self {
        Self { equipment_repo, client_repo }
    }

    pub async fn list(&self, session: &SessionContext, filter: EquipmentFilter) -> Result<Vec<EquipmentListing>, AppError> {
        self.equipment_repo.list(session.owner_id(), filter).await
    }

    pub async fn get(&self, session: &SessionContext, id: Uuid) -> Result<Equipment, AppError> {
        self.equipment_repo
            .find_by_id(session.owner_id(), id)
            .await?
            .ok_or(AppError::EquipmentNotFound)
    }

    pub async fn create(&self, session: &SessionContext, equipment: NewEquipment) -> Result<Equipment, AppError> {
        self.ensure_client(session, equipment.client_id).await?;
        self.equipment_repo.create(session.owner_id(), equipment).await
    }

    pub async fn update(&self, session: &SessionContext, id: Uuid, patch: EquipmentPatch) -> Result<Equipment, AppError> {
        if let Some(client_id) = patch.client_id {
            self.ensure_client(session, client_id).await?;
        }
        self.equipment_repo
            .update(session.owner_id(), id, patch)
            .await?
            .ok_or(AppError::EquipmentNotFound)
    }

    pub async fn delete(&self, session: &SessionContext, id: Uuid) -> Result<(), AppError> {
        if !self.equipment_repo.delete(session.owner_id(), id).await? {
            return Err(AppError::EquipmentNotFound);
        }
        Ok(())
    }

    // O cliente precisa existir para o mesmo dono
    async fn ensure_client(&self, session: &SessionContext, client_id: Uuid) -> Result<(), AppError> {
        self.client_repo
            .find_by_id(session.owner_id(), client_id)
            .await?
            .map(|_| ())
            .ok_or(AppError::ClientNotFound)
    }
}
