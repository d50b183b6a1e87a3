// src/services/client_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, EquipmentRepository, ServiceOrderRepository},
    models::{
        auth::SessionContext,
        clients::{Client, ClientPatch, NewClient},
    },
};

#[derive(Clone)]
pub struct ClientService {
    client_repo: Arc<dyn ClientRepository>,
    equipment_repo: Arc<dyn EquipmentRepository>,
    order_repo: Arc<dyn ServiceOrderRepository>,
}

impl ClientService {
    pub fn new(
        client_repo: Arc<dyn ClientRepository>,
        equipment_repo: Arc<dyn EquipmentRepository>,
        order_repo: Arc<dyn ServiceOrderRepository>,
    ) -> Self {
        Self { client_repo, equipment_repo, order_repo }
    }

    pub async fn list(&self, session: &SessionContext) -> Result<Vec<Client>, AppError> {
        self.client_repo.list(session.owner_id()).await
    }

    pub async fn get(&self, session: &SessionContext, id: Uuid) -> Result<Client, AppError> {
        self.client_repo
            .find_by_id(session.owner_id(), id)
            .await?
            .ok_or(AppError::ClientNotFound)
    }

    pub async fn create(&self, session: &SessionContext, client: NewClient) -> Result<Client, AppError> {
        self.client_repo.create(session.owner_id(), client).await
    }

    pub async fn update(&self, session: &SessionContext, id: Uuid, patch: ClientPatch) -> Result<Client, AppError> {
        self.client_repo
            .update(session.owner_id(), id, patch)
            .await?
            .ok_or(AppError::ClientNotFound)
    }

    /// Só apaga clientes sem equipamentos e sem OS. As contagens são
    /// consultas separadas; a FK RESTRICT cobre o que entrar no meio.
    pub async fn delete(&self, session: &SessionContext, id: Uuid) -> Result<(), AppError> {
        let owner_id = session.owner_id();

        if self.equipment_repo.count_for_client(owner_id, id).await? > 0 {
            return Err(AppError::ClientHasEquipment);
        }
        if self.order_repo.count_for_client(owner_id, id).await? > 0 {
            return Err(AppError::ClientHasServiceOrders);
        }

        if !self.client_repo.delete(owner_id, id).await? {
            return Err(AppError::ClientNotFound);
        }
        tracing::info!(client_id = %id, "cliente removido");
        Ok(())
    }
}
