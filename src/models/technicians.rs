// src/models/technicians.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::forms::{blank_to_none, not_blank, patch_optional};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Admin,
    Technician,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "technician_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TechnicianStatus {
    Active,
    Inactive,
}

impl TechnicianStatus {
    pub fn toggled(self) -> Self {
        match self {
            TechnicianStatus::Active => TechnicianStatus::Inactive,
            TechnicianStatus::Inactive => TechnicianStatus::Active,
        }
    }
}

// --- Perfil ---

/// Perfil de um usuário do sistema: administrador (dono) ou técnico.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "Carlos Lima")]
    pub name: String,
    #[schema(example = "11988887777")]
    pub phone: Option<String>,
    #[schema(example = "Técnico de bancada")]
    pub position: Option<String>,
    pub status: TechnicianStatus,
    pub user_type: UserType,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Só perfis do tipo técnico podem ser responsáveis por uma OS.
    pub fn is_assignable(&self) -> bool {
        self.user_type == UserType::Technician
    }
}

/// Opção do seletor de técnicos no formulário de OS.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianOption {
    pub id: Uuid,
    pub name: String,
}

impl From<&Profile> for TechnicianOption {
    fn from(profile: &Profile) -> Self {
        Self { id: profile.id, name: profile.name.clone() }
    }
}

#[derive(Debug, Clone)]
pub struct NewProfile {
    pub name: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub user_type: UserType,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub phone: Option<Option<String>>,
    pub position: Option<Option<String>>,
    pub status: Option<TechnicianStatus>,
}

impl ProfilePatch {
    pub fn status(status: TechnicianStatus) -> Self {
        Self { status: Some(status), ..Default::default() }
    }
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTechnicianPayload {
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "carlos@oficina.com")]
    pub email: String,

    #[validate(length(min = 6, message = "password_too_short"))]
    pub password: String,

    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Carlos Lima")]
    pub name: String,

    pub phone: Option<String>,
    pub position: Option<String>,
}

impl CreateTechnicianPayload {
    pub fn profile(&self, created_by: Uuid) -> NewProfile {
        NewProfile {
            name: self.name.trim().to_string(),
            phone: blank_to_none(self.phone.clone()),
            position: blank_to_none(self.position.clone()),
            user_type: UserType::Technician,
            created_by: Some(created_by),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTechnicianPayload {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub status: Option<TechnicianStatus>,
}

impl From<UpdateTechnicianPayload> for ProfilePatch {
    fn from(payload: UpdateTechnicianPayload) -> Self {
        Self {
            name: payload.name.map(|n| n.trim().to_string()),
            phone: patch_optional(payload.phone),
            position: patch_optional(payload.position),
            status: payload.status,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordPayload {
    #[validate(length(min = 6, message = "password_too_short"))]
    pub new_password: String,
}
