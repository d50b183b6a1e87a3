// src/handlers/service_orders.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
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
        service_orders::{
            CreateServiceOrderPayload, FormOptions, FormOptionsQuery, NewServiceOrder, OrderFilter,
            ServiceOrder, ServiceOrderDetail, ServiceOrderPatch, UpdateServiceOrderPayload,
        },
    },
};

// GET /api/service-orders?status=&client_id=
#[utoipa::path(
    get,
    path = "/api/service-orders",
    tag = "ServiceOrders",
    params(OrderFilter),
    responses((status = 200, description = "OS com cliente, equipamento e técnico", body = Vec<ServiceOrderDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Query(filter): Query<OrderFilter>,
) -> Result<Json<Vec<ServiceOrderDetail>>, ApiError> {
    let orders = app_state
        .service_order_service
        .list(&session, filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(orders))
}

// GET /api/service-orders/form-options?client_id=
#[utoipa::path(
    get,
    path = "/api/service-orders/form-options",
    tag = "ServiceOrders",
    params(FormOptionsQuery),
    responses((status = 200, description = "Seletores do formulário de OS", body = FormOptions)),
    security(("api_jwt" = []))
)]
pub async fn form_options(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Query(query): Query<FormOptionsQuery>,
) -> Result<Json<FormOptions>, ApiError> {
    let options = app_state
        .service_order_service
        .form_options(&session, query.client_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(options))
}

// POST /api/service-orders
#[utoipa::path(
    post,
    path = "/api/service-orders",
    tag = "ServiceOrders",
    request_body = CreateServiceOrderPayload,
    responses(
        (status = 201, description = "OS criada", body = ServiceOrder),
        (status = 400, description = "Campos obrigatórios ausentes ou valor inválido"),
        (status = 422, description = "Equipamento de outro cliente ou técnico inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Json(payload): Json<CreateServiceOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    // Nada chega ao banco sem cliente, equipamento, técnico e problema
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;
    let order = NewServiceOrder::from_payload(payload)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let created = app_state
        .service_order_service
        .create(&session, order)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /api/service-orders/{id}
#[utoipa::path(
    get,
    path = "/api/service-orders/{id}",
    tag = "ServiceOrders",
    params(("id" = Uuid, Path, description = "ID da OS")),
    responses(
        (status = 200, description = "OS com os dados relacionados", body = ServiceOrderDetail),
        (status = 404, description = "OS não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceOrderDetail>, ApiError> {
    let order = app_state
        .service_order_service
        .get(&session, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(order))
}

// PATCH /api/service-orders/{id}
#[utoipa::path(
    patch,
    path = "/api/service-orders/{id}",
    tag = "ServiceOrders",
    params(("id" = Uuid, Path, description = "ID da OS")),
    request_body = UpdateServiceOrderPayload,
    responses(
        (status = 200, description = "OS atualizada", body = ServiceOrder),
        (status = 404, description = "OS não encontrada"),
        (status = 422, description = "Referências inconsistentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServiceOrderPayload>,
) -> Result<Json<ServiceOrder>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;
    let patch = ServiceOrderPatch::from_payload(payload)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let order = app_state
        .service_order_service
        .update(&session, id, patch)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(order))
}

// DELETE /api/service-orders/{id}
#[utoipa::path(
    delete,
    path = "/api/service-orders/{id}",
    tag = "ServiceOrders",
    params(("id" = Uuid, Path, description = "ID da OS")),
    responses(
        (status = 204, description = "OS removida com fotos e assinaturas"),
        (status = 404, description = "OS não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_order(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .service_order_service
        .delete(&session, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/service-orders/{id}/print
#[utoipa::path(
    get,
    path = "/api/service-orders/{id}/print",
    tag = "ServiceOrders",
    params(("id" = Uuid, Path, description = "ID da OS")),
    responses(
        (status = 200, description = "Documento HTML para impressão", body = String, content_type = "text/html"),
        (status = 404, description = "OS não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn print_order(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let html = app_state
        .service_order_service
        .print(&session, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html))
}
