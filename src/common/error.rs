// src/common/error.rs

use std::collections::HashMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Erros de domínio. A mensagem de cada variante é para os logs; a resposta
// HTTP usa o `code()` traduzido pelo I18nStore.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Valor monetário inválido")]
    InvalidValue,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Perfil não encontrado")]
    ProfileNotFound,

    #[error("Usuário inativo")]
    AccountInactive,

    #[error("Ação restrita a administradores")]
    AdminOnly,

    #[error("Cliente não encontrado")]
    ClientNotFound,

    #[error("Equipamento não encontrado")]
    EquipmentNotFound,

    #[error("Ordem de serviço não encontrada")]
    ServiceOrderNotFound,

    #[error("Técnico não encontrado")]
    TechnicianNotFound,

    #[error("Arquivo não encontrado")]
    MediaFileNotFound,

    #[error("Assinatura não encontrada")]
    SignatureNotFound,

    #[error("Cliente possui equipamentos")]
    ClientHasEquipment,

    #[error("Cliente possui ordens de serviço")]
    ClientHasServiceOrders,

    #[error("Equipamento possui ordens de serviço")]
    EquipmentInUse,

    #[error("Técnico possui ordens de serviço")]
    TechnicianHasOrders,

    #[error("Equipamento não pertence ao cliente")]
    EquipmentClientMismatch,

    #[error("Perfil não pode receber ordens de serviço")]
    TechnicianNotAssignable,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Chave do catálogo de mensagens; também vai no corpo da resposta.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_failed",
            AppError::InvalidValue => "invalid_value",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::EmailAlreadyExists => "email_already_exists",
            AppError::UserNotFound => "user_not_found",
            AppError::ProfileNotFound => "profile_not_found",
            AppError::AccountInactive => "account_inactive",
            AppError::AdminOnly => "admin_only",
            AppError::ClientNotFound => "client_not_found",
            AppError::EquipmentNotFound => "equipment_not_found",
            AppError::ServiceOrderNotFound => "service_order_not_found",
            AppError::TechnicianNotFound => "technician_not_found",
            AppError::MediaFileNotFound => "media_file_not_found",
            AppError::SignatureNotFound => "signature_not_found",
            AppError::ClientHasEquipment => "client_has_equipment",
            AppError::ClientHasServiceOrders => "client_has_service_orders",
            AppError::EquipmentInUse => "equipment_in_use",
            AppError::TechnicianHasOrders => "technician_has_orders",
            AppError::EquipmentClientMismatch => "equipment_client_mismatch",
            AppError::TechnicianNotAssignable => "technician_not_assignable",
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidValue => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::AccountInactive | AppError::AdminOnly => StatusCode::FORBIDDEN,
            AppError::UserNotFound
            | AppError::ProfileNotFound
            | AppError::ClientNotFound
            | AppError::EquipmentNotFound
            | AppError::ServiceOrderNotFound
            | AppError::TechnicianNotFound
            | AppError::MediaFileNotFound
            | AppError::SignatureNotFound => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyExists
            | AppError::ClientHasEquipment
            | AppError::ClientHasServiceOrders
            | AppError::EquipmentInUse
            | AppError::TechnicianHasOrders => StatusCode::CONFLICT,
            AppError::EquipmentClientMismatch | AppError::TechnicianNotAssignable => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte para a resposta HTTP no idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();
        if status.is_server_error() {
            // O detalhe fica só no log; o cliente recebe a mensagem genérica.
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors
                        .iter()
                        .map(|e| {
                            let key = e.message.as_deref().unwrap_or(e.code.as_ref());
                            store.translate(&locale.0, key)
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(json!(details))
            }
            _ => None,
        };

        ApiError {
            status,
            code: self.code().to_string(),
            error: store.translate(&locale.0, self.code()),
            details,
        }
    }
}

/// Erro pronto para o cliente: status, código estável e mensagem traduzida.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "code": self.code, "error": self.error, "details": details }),
            None => json!({ "code": self.code, "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}
