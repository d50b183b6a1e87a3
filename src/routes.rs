// src/routes.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

/// Monta o router completo da API sobre um `AppState` pronto.
pub fn build_router(app_state: AppState) -> Router {
    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let client_routes = Router::new()
        .route(
            "/",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/{id}",
            get(handlers::clients::get_client)
                .patch(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        );

    let equipment_routes = Router::new()
        .route(
            "/",
            get(handlers::equipment::list_equipment).post(handlers::equipment::create_equipment),
        )
        .route(
            "/{id}",
            get(handlers::equipment::get_equipment)
                .patch(handlers::equipment::update_equipment)
                .delete(handlers::equipment::delete_equipment),
        );

    let order_routes = Router::new()
        .route(
            "/",
            get(handlers::service_orders::list_orders).post(handlers::service_orders::create_order),
        )
        .route("/form-options", get(handlers::service_orders::form_options))
        .route(
            "/{id}",
            get(handlers::service_orders::get_order)
                .patch(handlers::service_orders::update_order)
                .delete(handlers::service_orders::delete_order),
        )
        .route("/{id}/print", get(handlers::service_orders::print_order))
        .route(
            "/{id}/media",
            get(handlers::attachments::list_media).post(handlers::attachments::add_media),
        )
        .route(
            "/{id}/signatures",
            get(handlers::attachments::list_signatures).post(handlers::attachments::add_signature),
        );

    // Administração da equipe: o extrator AdminSession exige perfil admin
    let technician_routes = Router::new()
        .route(
            "/",
            get(handlers::technicians::list_technicians)
                .post(handlers::technicians::create_technician),
        )
        .route(
            "/{id}",
            get(handlers::technicians::get_technician)
                .patch(handlers::technicians::update_technician)
                .delete(handlers::technicians::delete_technician),
        )
        .route("/{id}/toggle-status", post(handlers::technicians::toggle_status))
        .route("/{id}/reset-password", post(handlers::technicians::reset_password));

    let protected_routes = Router::new()
        // Sessão da própria conta
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::get_me))
        .nest("/clients", client_routes)
        .nest("/equipment", equipment_routes)
        .nest("/service-orders", order_routes)
        .nest("/technicians", technician_routes)
        .route("/media/{id}", delete(handlers::attachments::delete_media))
        .route("/signatures/{id}", delete(handlers::attachments::delete_signature))
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route_layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let api = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/auth", auth_routes)
        .merge(protected_routes);

    // Combina tudo no router principal
    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
