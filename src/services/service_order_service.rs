// src/services/service_order_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, EquipmentRepository, ProfileRepository, ServiceOrderRepository},
    models::{
        auth::SessionContext,
        clients::ClientOption,
        equipment::{EquipmentFilter, EquipmentOption, equipment_for_client},
        service_orders::{
            FormOptions, NewServiceOrder, OrderFilter, ServiceOrder, ServiceOrderDetail,
            ServiceOrderPatch,
        },
        technicians::TechnicianOption,
    },
    services::print_service,
};

#[derive(Clone)]
pub struct ServiceOrderService {
    order_repo: Arc<dyn ServiceOrderRepository>,
    client_repo: Arc<dyn ClientRepository>,
    equipment_repo: Arc<dyn EquipmentRepository>,
    profile_repo: Arc<dyn ProfileRepository>,
}

impl ServiceOrderService {
    pub fn new(
        order_repo: Arc<dyn ServiceOrderRepository>,
        client_repo: Arc<dyn ClientRepository>,
        equipment_repo: Arc<dyn EquipmentRepository>,
        profile_repo: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self { order_repo, client_repo, equipment_repo, profile_repo }
    }

    pub async fn list(&self, session: &SessionContext, filter: OrderFilter) -> Result<Vec<ServiceOrderDetail>, AppError> {
        self.order_repo.list(session.owner_id(), filter).await
    }

    pub async fn get(&self, session: &SessionContext, id: Uuid) -> Result<ServiceOrderDetail, AppError> {
        self.order_repo
            .find_by_id(session.owner_id(), id)
            .await?
            .ok_or(AppError::ServiceOrderNotFound)
    }

    pub async fn create(&self, session: &SessionContext, order: NewServiceOrder) -> Result<ServiceOrder, AppError> {
        self.check_references(session, order.client_id, order.equipment_id, order.technician_id)
            .await?;

        let created = self.order_repo.create(session.owner_id(), order).await?;
        tracing::info!(order = %created.number(), "ordem de serviço criada");
        Ok(created)
    }

    /// Aplica o PATCH. Se ele mexe em cliente, equipamento ou técnico, as
    /// regras de referência são checadas sobre o registro já mesclado.
    pub async fn update(&self, session: &SessionContext, id: Uuid, patch: ServiceOrderPatch) -> Result<ServiceOrder, AppError> {
        if patch.touches_references() {
            let current = self.get(session, id).await?.order;
            self.check_references(
                session,
                patch.client_id.unwrap_or(current.client_id),
                patch.equipment_id.unwrap_or(current.equipment_id),
                patch.technician_id.unwrap_or(current.technician_id),
            )
            .await?;
        }

        self.order_repo
            .update(session.owner_id(), id, patch)
            .await?
            .ok_or(AppError::ServiceOrderNotFound)
    }

    pub async fn delete(&self, session: &SessionContext, id: Uuid) -> Result<(), AppError> {
        if !self.order_repo.delete(session.owner_id(), id).await? {
            return Err(AppError::ServiceOrderNotFound);
        }
        Ok(())
    }

    /// Listas do formulário de nova OS. Os equipamentos dependem do cliente
    /// selecionado; sem cliente a lista vem vazia.
    pub async fn form_options(&self, session: &SessionContext, client_id: Option<Uuid>) -> Result<FormOptions, AppError> {
        let owner_id = session.owner_id();

        let clients = self.client_repo.list(owner_id).await?;
        let equipment: Vec<_> = self
            .equipment_repo
            .list(owner_id, EquipmentFilter::default())
            .await?
            .into_iter()
            .map(|listing| listing.equipment)
            .collect();
        let mut technicians = self.profile_repo.list_technicians(owner_id).await?;
        technicians.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(FormOptions {
            clients: clients.iter().map(ClientOption::from).collect(),
            equipment: equipment_for_client(&equipment, client_id)
                .into_iter()
                .map(EquipmentOption::from)
                .collect(),
            technicians: technicians.iter().map(TechnicianOption::from).collect(),
        })
    }

    /// Documento HTML de impressão da OS.
    pub async fn print(&self, session: &SessionContext, id: Uuid) -> Result<String, AppError> {
        let order = self.get(session, id).await?;
        Ok(print_service::render_order(&order, Utc::now()))
    }

    async fn check_references(
        &self,
        session: &SessionContext,
        client_id: Uuid,
        equipment_id: Uuid,
        technician_id: Uuid,
    ) -> Result<(), AppError> {
        let owner_id = session.owner_id();

        self.client_repo
            .find_by_id(owner_id, client_id)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        let equipment = self
            .equipment_repo
            .find_by_id(owner_id, equipment_id)
            .await?
            .ok_or(AppError::EquipmentNotFound)?;
        if equipment.client_id != client_id {
            return Err(AppError::EquipmentClientMismatch);
        }

        let technician = self
            .profile_repo
            .find_by_id(owner_id, technician_id)
            .await?
            .ok_or(AppError::TechnicianNotFound)?;
        if !technician.is_assignable() {
            return Err(AppError::TechnicianNotAssignable);
        }

        Ok(())
    }
}
