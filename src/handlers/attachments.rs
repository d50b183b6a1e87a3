// src/handlers/attachments.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{
        attachments::{CreateMediaFilePayload, CreateSignaturePayload, MediaFile, Signature},
        auth::SessionContext,
    },
};

// =============================================================================
//  FOTOS E ARQUIVOS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/service-orders/{id}/media",
    tag = "Attachments",
    params(("id" = Uuid, Path, description = "ID da OS")),
    responses(
        (status = 200, description = "Arquivos da OS", body = Vec<MediaFile>),
        (status = 404, description = "OS não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_media(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Vec<MediaFile>>, ApiError> {
    let files = app_state
        .attachment_service
        .list_media(&session, order_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(files))
}

#[utoipa::path(
    post,
    path = "/api/service-orders/{id}/media",
    tag = "Attachments",
    params(("id" = Uuid, Path, description = "ID da OS")),
    request_body = CreateMediaFilePayload,
    responses(
        (status = 201, description = "Arquivo registrado", body = MediaFile),
        (status = 404, description = "OS não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_media(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<CreateMediaFilePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let file = app_state
        .attachment_service
        .add_media(&session, order_id, payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok((StatusCode::CREATED, Json(file)))
}

#[utoipa::path(
    delete,
    path = "/api/media/{id}",
    tag = "Attachments",
    params(("id" = Uuid, Path, description = "ID do arquivo")),
    responses(
        (status = 204, description = "Arquivo removido"),
        (status = 404, description = "Arquivo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_media(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .attachment_service
        .delete_media(&session, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ASSINATURAS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/service-orders/{id}/signatures",
    tag = "Attachments",
    params(("id" = Uuid, Path, description = "ID da OS")),
    responses(
        (status = 200, description = "Assinaturas da OS", body = Vec<Signature>),
        (status = 404, description = "OS não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_signatures(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Vec<Signature>>, ApiError> {
    let signatures = app_state
        .attachment_service
        .list_signatures(&session, order_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(signatures))
}

#[utoipa::path(
    post,
    path = "/api/service-orders/{id}/signatures",
    tag = "Attachments",
    params(("id" = Uuid, Path, description = "ID da OS")),
    request_body = CreateSignaturePayload,
    responses(
        (status = 201, description = "Assinatura registrada", body = Signature),
        (status = 404, description = "OS não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_signature(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<CreateSignaturePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let signature = app_state
        .attachment_service
        .add_signature(&session, order_id, &payload.signature_url)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok((StatusCode::CREATED, Json(signature)))
}

#[utoipa::path(
    delete,
    path = "/api/signatures/{id}",
    tag = "Attachments",
    params(("id" = Uuid, Path, description = "ID da assinatura")),
    responses(
        (status = 204, description = "Assinatura removida"),
        (status = 404, description = "Assinatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_signature(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .attachment_service
        .delete_signature(&session, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(StatusCode::NO_CONTENT)
}
