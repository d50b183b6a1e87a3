// src/models/attachments.rs
//
// Fotos/arquivos e assinaturas de uma OS. Só guardamos URL e metadados;
// o arquivo em si fica no storage externo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::forms::{blank_to_none, not_blank};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    pub id: Uuid,
    pub service_order_id: Uuid,
    pub file_url: String,
    #[schema(example = "image/jpeg")]
    pub file_type: String,
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub id: Uuid,
    pub service_order_id: Uuid,
    pub signature_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMediaFilePayload {
    #[validate(custom(function = "not_blank"))]
    pub file_url: String,
    #[validate(custom(function = "not_blank"))]
    pub file_type: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMediaFile {
    pub file_url: String,
    pub file_type: String,
    pub file_name: Option<String>,
}

impl From<CreateMediaFilePayload> for NewMediaFile {
    fn from(payload: CreateMediaFilePayload) -> Self {
        Self {
            file_url: payload.file_url.trim().to_string(),
            file_type: payload.file_type.trim().to_string(),
            file_name: blank_to_none(payload.file_name),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSignaturePayload {
    #[validate(custom(function = "not_blank"))]
    pub signature_url: String,
}
