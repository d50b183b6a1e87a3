// src/handlers/equipment.rs

use axum::{
    Json,
    extract::{Path, Query, State},
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
        auth::SessionContext,
        equipment::{
            CreateEquipmentPayload, Equipment, EquipmentFilter, EquipmentListing, NewEquipment,
            UpdateEquipmentPayload,
        },
    },
};

// GET /api/equipment?client_id=
#[utoipa::path(
    get,
    path = "/api/equipment",
    tag = "Equipment",
    params(EquipmentFilter),
    responses((status = 200, description = "Equipamentos com o nome do cliente", body = Vec<EquipmentListing>)),
    security(("api_jwt" = []))
)]
pub async fn list_equipment(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Query(filter): Query<EquipmentFilter>,
) -> Result<Json<Vec<EquipmentListing>>, ApiError> {
    let equipment = app_state
        .equipment_service
        .list(&session, filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(equipment))
}

// POST /api/equipment
#[utoipa::path(
    post,
    path = "/api/equipment",
    tag = "Equipment",
    request_body = CreateEquipmentPayload,
    responses(
        (status = 201, description = "Equipamento cadastrado", body = Equipment),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_equipment(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Json(payload): Json<CreateEquipmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let Some(client_id) = payload.client_id else {
        return Err(AppError::ClientNotFound.to_api_error(&locale, &app_state.i18n_store));
    };

    let equipment = app_state
        .equipment_service
        .create(&session, NewEquipment::from_payload(client_id, payload))
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(equipment)))
}

// GET /api/equipment/{id}
#[utoipa::path(
    get,
    path = "/api/equipment/{id}",
    tag = "Equipment",
    params(("id" = Uuid, Path, description = "ID do equipamento")),
    responses(
        (status = 200, description = "Equipamento", body = Equipment),
        (status = 404, description = "Equipamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_equipment(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Equipment>, ApiError> {
    let equipment = app_state
        .equipment_service
        .get(&session, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(equipment))
}

// PATCH /api/equipment/{id}
#[utoipa::path(
    patch,
    path = "/api/equipment/{id}",
    tag = "Equipment",
    params(("id" = Uuid, Path, description = "ID do equipamento")),
    request_body = UpdateEquipmentPayload,
    responses(
        (status = 200, description = "Equipamento atualizado", body = Equipment),
        (status = 404, description = "Equipamento não encontrado"),
        (status = 409, description = "Equipamento em uso por ordens de serviço")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_equipment(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEquipmentPayload>,
) -> Result<Json<Equipment>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let equipment = app_state
        .equipment_service
        .update(&session, id, payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(equipment))
}

// DELETE /api/equipment/{id}
#[utoipa::path(
    delete,
    path = "/api/equipment/{id}",
    tag = "Equipment",
    params(("id" = Uuid, Path, description = "ID do equipamento")),
    responses(
        (status = 204, description = "Equipamento removido"),
        (status = 404, description = "Equipamento não encontrado"),
        (status = 409, description = "Equipamento em uso por ordens de serviço")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_equipment(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .equipment_service
        .delete(&session, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(StatusCode::NO_CONTENT)
}
