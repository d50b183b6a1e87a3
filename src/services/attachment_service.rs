// src/services/attachment_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AttachmentRepository, ServiceOrderRepository},
    models::{
        attachments::{MediaFile, NewMediaFile, Signature},
        auth::SessionContext,
    },
};

#[derive(Clone)]
pub struct AttachmentService {
    order_repo: Arc<dyn ServiceOrderRepository>,
    attachment_repo: Arc<dyn AttachmentRepository>,
}

impl AttachmentService {
    pub fn new(order_repo: Arc<dyn ServiceOrderRepository>, attachment_repo: Arc<dyn AttachmentRepository>) -> Self {
        Self { order_repo, attachment_repo }
    }

    // A OS precisa ser do dono da sessão
    async fn ensure_order(&self, session: &SessionContext, order_id: Uuid) -> Result<(), AppError> {
        self.order_repo
            .find_by_id(session.owner_id(), order_id)
            .await?
            .map(|_| ())
            .ok_or(AppError::ServiceOrderNotFound)
    }

    pub async fn list_media(&self, session: &SessionContext, order_id: Uuid) -> Result<Vec<MediaFile>, AppError> {
        self.ensure_order(session, order_id).await?;
        self.attachment_repo.list_media(session.owner_id(), order_id).await
    }

    pub async fn add_media(&self, session: &SessionContext, order_id: Uuid, file: NewMediaFile) -> Result<MediaFile, AppError> {
        self.ensure_order(session, order_id).await?;
        self.attachment_repo.add_media(session.owner_id(), order_id, file).await
    }

    pub async fn delete_media(&self, session: &SessionContext, id: Uuid) -> Result<(), AppError> {
        if !self.attachment_repo.delete_media(session.owner_id(), id).await? {
            return Err(AppError::MediaFileNotFound);
        }
        Ok(())
    }

    pub async fn list_signatures(&self, session: &SessionContext, order_id: Uuid) -> Result<Vec<Signature>, AppError> {
        self.ensure_order(session, order_id).await?;
        self.attachment_repo.list_signatures(session.owner_id(), order_id).await
    }

    pub async fn add_signature(&self, session: &SessionContext, order_id: Uuid, signature_url: &str) -> Result<Signature, AppError> {
        self.ensure_order(session, order_id).await?;
        self.attachment_repo
            .add_signature(session.owner_id(), order_id, signature_url.trim())
            .await
    }

    pub async fn delete_signature(&self, session: &SessionContext, id: Uuid) -> Result<(), AppError> {
        if !self.attachment_repo.delete_signature(session.owner_id(), id).await? {
            return Err(AppError::SignatureNotFound);
        }
        Ok(())
    }
}
