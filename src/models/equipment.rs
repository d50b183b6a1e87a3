// src/models/equipment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::forms::{blank_to_none, blank_uuid, not_blank, patch_optional};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub client_id: Uuid,
    // "type" é palavra reservada em Rust
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    #[schema(example = "Notebook")]
    pub equipment_type: String,
    #[schema(example = "Dell")]
    pub brand: Option<String>,
    #[schema(example = "Inspiron 15")]
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Equipment {
    /// Texto do seletor: "Notebook - Dell Inspiron 15".
    pub fn display_name(&self) -> String {
        let details = [self.brand.as_deref(), self.model.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if details.is_empty() {
            self.equipment_type.clone()
        } else {
            format!("{} - {}", self.equipment_type, details)
        }
    }
}

/// Equipamento com o nome do cliente, para a listagem.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub equipment: Equipment,
    pub client_name: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "snake_case")]
#[into_params(parameter_in = Query)]
pub struct EquipmentFilter {
    pub client_id: Option<Uuid>,
}

/// Opção do seletor de equipamentos do formulário de OS.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentOption {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
}

impl From<&Equipment> for EquipmentOption {
    fn from(equipment: &Equipment) -> Self {
        Self {
            id: equipment.id,
            client_id: equipment.client_id,
            name: equipment.display_name(),
        }
    }
}

/// Equipamentos do cliente selecionado. Sem cliente, a lista fica vazia.
pub fn equipment_for_client(equipment: &[Equipment], client_id: Option<Uuid>) -> Vec<&Equipment> {
    match client_id {
        Some(client_id) => equipment.iter().filter(|e| e.client_id == client_id).collect(),
        None => Vec::new(),
    }
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentPayload {
    #[serde(default, deserialize_with = "blank_uuid")]
    #[validate(required(message = "required"))]
    pub client_id: Option<Uuid>,

    #[serde(rename = "type", default)]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Notebook")]
    pub equipment_type: String,

    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub observations: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipmentPayload {
    pub client_id: Option<Uuid>,

    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank"))]
    pub equipment_type: Option<String>,

    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub observations: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEquipment {
    pub client_id: Uuid,
    pub equipment_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub observations: Option<String>,
}

impl NewEquipment {
    pub fn from_payload(client_id: Uuid, payload: CreateEquipmentPayload) -> Self {
        Self {
            client_id,
            equipment_type: payload.equipment_type.trim().to_string(),
            brand: blank_to_none(payload.brand),
            model: blank_to_none(payload.model),
            serial_number: blank_to_none(payload.serial_number),
            observations: blank_to_none(payload.observations),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentPatch {
    pub client_id: Option<Uuid>,
    pub equipment_type: Option<String>,
    pub brand: Option<Option<String>>,
    pub model: Option<Option<String>>,
    pub serial_number: Option<Option<String>>,
    pub observations: Option<Option<String>>,
}

impl From<UpdateEquipmentPayload> for EquipmentPatch {
    fn from(payload: UpdateEquipmentPayload) -> Self {
        Self {
            client_id: payload.client_id,
            equipment_type: payload.equipment_type.map(|t| t.trim().to_string()),
            brand: patch_optional(payload.brand),
            model: patch_optional(payload.model),
            serial_number: patch_optional(payload.serial_number),
            observations: patch_optional(payload.observations),
        }
    }
}
