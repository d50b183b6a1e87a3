// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::SessionContext,
};

/// Guardião das rotas de administração: só passa se o perfil da sessão for
/// `admin`. O perfil vem do banco a cada requisição, não do token.
pub struct AdminSession(pub SessionContext);

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = SessionContext::from_request_parts(parts, state).await?;

        if !session.is_admin() {
            let app_state = AppState::from_ref(state);
            let Ok(locale) = Locale::from_request_parts(parts, state).await;
            tracing::warn!(user_id = %session.user.id, "acesso administrativo negado");
            return Err(AppError::AdminOnly.to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(AdminSession(session))
    }
}
