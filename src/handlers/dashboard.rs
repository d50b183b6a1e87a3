// src/handlers/dashboard.rs

use axum::{Json, extract::State};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::{auth::SessionContext, dashboard::Dashboard},
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses((status = 200, description = "Indicadores e OS recentes", body = Dashboard)),
    security(("api_jwt" = []))
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    locale: Locale,
    session: SessionContext,
) -> Result<Json<Dashboard>, ApiError> {
    let dashboard = app_state
        .dashboard_service
        .get_dashboard(&session)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(dashboard))
}
