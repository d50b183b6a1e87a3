// src/models/clients.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::forms::{blank_to_none, not_blank, patch_optional};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[schema(example = "Ana")]
    pub name: String,
    #[schema(example = "ana@email.com")]
    pub email: Option<String>,
    #[schema(example = "11999999999")]
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Opção do seletor de clientes.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientOption {
    pub id: Uuid,
    pub name: String,
}

impl From<&Client> for ClientOption {
    fn from(client: &Client) -> Self {
        Self { id: client.id, name: client.name.clone() }
    }
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Ana")]
    pub name: String,
    pub email: Option<String>,
    #[schema(example = "11999999999")]
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

// --- Dados normalizados para o repositório ---

#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<CreateClientPayload> for NewClient {
    fn from(payload: CreateClientPayload) -> Self {
        Self {
            name: payload.name.trim().to_string(),
            email: blank_to_none(payload.email),
            phone: blank_to_none(payload.phone),
            address: blank_to_none(payload.address),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub address: Option<Option<String>>,
}

impl From<UpdateClientPayload> for ClientPatch {
    fn from(payload: UpdateClientPayload) -> Self {
        Self {
            name: payload.name.map(|n| n.trim().to_string()),
            email: patch_optional(payload.email),
            phone: patch_optional(payload.phone),
            address: patch_optional(payload.address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let payload = CreateClientPayload {
            name: "   ".into(),
            email: None,
            phone: None,
            address: None,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn new_client_drops_blank_optionals() {
        let client = NewClient::from(CreateClientPayload {
            name: " Ana ".into(),
            email: Some("".into()),
            phone: Some("11999999999".into()),
            address: Some("  ".into()),
        });
        assert_eq!(
            client,
            NewClient {
                name: "Ana".into(),
                email: None,
                phone: Some("11999999999".into()),
                address: None,
            }
        );
    }
}
