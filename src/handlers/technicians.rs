// src/handlers/technicians.rs
//
// Rotas de administração da equipe. O extrator `AdminSession` barra quem
// não é admin antes de qualquer leitura do corpo.

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
    middleware::{i18n::Locale, rbac::AdminSession},
    models::technicians::{
        CreateTechnicianPayload, Profile, ResetPasswordPayload, UpdateTechnicianPayload,
    },
};

// GET /api/technicians
#[utoipa::path(
    get,
    path = "/api/technicians",
    tag = "Technicians",
    responses(
        (status = 200, description = "Técnicos, mais novos primeiro", body = Vec<Profile>),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_technicians(
    State(app_state): State<AppState>,
    locale: Locale,
    AdminSession(session): AdminSession,
) -> Result<Json<Vec<Profile>>, ApiError> {
    let technicians = app_state
        .technician_service
        .list(&session)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(technicians))
}

// POST /api/technicians
#[utoipa::path(
    post,
    path = "/api/technicians",
    tag = "Technicians",
    request_body = CreateTechnicianPayload,
    responses(
        (status = 201, description = "Técnico cadastrado", body = Profile),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Apenas administradores"),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_technician(
    State(app_state): State<AppState>,
    locale: Locale,
    AdminSession(session): AdminSession,
    Json(payload): Json<CreateTechnicianPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let technician = app_state
        .technician_service
        .create(&session, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(technician)))
}

// GET /api/technicians/{id}
#[utoipa::path(
    get,
    path = "/api/technicians/{id}",
    tag = "Technicians",
    params(("id" = Uuid, Path, description = "ID do perfil")),
    responses(
        (status = 200, description = "Técnico", body = Profile),
        (status = 404, description = "Técnico não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_technician(
    State(app_state): State<AppState>,
    locale: Locale,
    AdminSession(session): AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Json<Profile>, ApiError> {
    let technician = app_state
        .technician_service
        .get(&session, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(technician))
}

// PATCH /api/technicians/{id}
#[utoipa::path(
    patch,
    path = "/api/technicians/{id}",
    tag = "Technicians",
    params(("id" = Uuid, Path, description = "ID do perfil")),
    request_body = UpdateTechnicianPayload,
    responses(
        (status = 200, description = "Técnico atualizado", body = Profile),
        (status = 404, description = "Técnico não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_technician(
    State(app_state): State<AppState>,
    locale: Locale,
    AdminSession(session): AdminSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTechnicianPayload>,
) -> Result<Json<Profile>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let technician = app_state
        .technician_service
        .update(&session, id, payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(technician))
}

// POST /api/technicians/{id}/toggle-status
#[utoipa::path(
    post,
    path = "/api/technicians/{id}/toggle-status",
    tag = "Technicians",
    params(("id" = Uuid, Path, description = "ID do perfil")),
    responses(
        (status = 200, description = "Status invertido", body = Profile),
        (status = 404, description = "Técnico não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_status(
    State(app_state): State<AppState>,
    locale: Locale,
    AdminSession(session): AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Json<Profile>, ApiError> {
    let technician = app_state
        .technician_service
        .toggle_status(&session, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(technician))
}

// POST /api/technicians/{id}/reset-password
#[utoipa::path(
    post,
    path = "/api/technicians/{id}/reset-password",
    tag = "Technicians",
    params(("id" = Uuid, Path, description = "ID do perfil")),
    request_body = ResetPasswordPayload,
    responses(
        (status = 204, description = "Senha redefinida e sessões encerradas"),
        (status = 400, description = "Senha curta demais"),
        (status = 404, description = "Técnico não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn reset_password(
    State(app_state): State<AppState>,
    locale: Locale,
    AdminSession(session): AdminSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<StatusCode, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .technician_service
        .reset_password(&session, id, &payload.new_password)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/technicians/{id}
#[utoipa::path(
    delete,
    path = "/api/technicians/{id}",
    tag = "Technicians",
    params(("id" = Uuid, Path, description = "ID do perfil")),
    responses(
        (status = 204, description = "Técnico removido"),
        (status = 404, description = "Técnico não encontrado"),
        (status = 409, description = "Técnico possui ordens de serviço")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_technician(
    State(app_state): State<AppState>,
    locale: Locale,
    AdminSession(session): AdminSession,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .technician_service
        .delete(&session, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(StatusCode::NO_CONTENT)
}
