// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::logout,
        handlers::auth::get_me,

        // --- Clients ---
        handlers::clients::list_clients,
        handlers::clients::create_client,
        handlers::clients::get_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- Equipment ---
        handlers::equipment::list_equipment,
        handlers::equipment::create_equipment,
        handlers::equipment::get_equipment,
        handlers::equipment::update_equipment,
        handlers::equipment::delete_equipment,

        // --- Service orders ---
        handlers::service_orders::list_orders,
        handlers::service_orders::form_options,
        handlers::service_orders::create_order,
        handlers::service_orders::get_order,
        handlers::service_orders::update_order,
        handlers::service_orders::delete_order,
        handlers::service_orders::print_order,

        // --- Attachments ---
        handlers::attachments::list_media,
        handlers::attachments::add_media,
        handlers::attachments::delete_media,
        handlers::attachments::list_signatures,
        handlers::attachments::add_signature,
        handlers::attachments::delete_signature,

        // --- Technicians ---
        handlers::technicians::list_technicians,
        handlers::technicians::create_technician,
        handlers::technicians::get_technician,
        handlers::technicians::update_technician,
        handlers::technicians::toggle_status,
        handlers::technicians::reset_password,
        handlers::technicians::delete_technician,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::SessionContext,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Clients ---
            models::clients::Client,
            models::clients::ClientOption,
            models::clients::CreateClientPayload,
            models::clients::UpdateClientPayload,

            // --- Equipment ---
            models::equipment::Equipment,
            models::equipment::EquipmentListing,
            models::equipment::EquipmentOption,
            models::equipment::CreateEquipmentPayload,
            models::equipment::UpdateEquipmentPayload,

            // --- Service orders ---
            models::service_orders::OrderStatus,
            models::service_orders::PaymentStatus,
            models::service_orders::Badge,
            models::service_orders::ServiceOrder,
            models::service_orders::ServiceOrderDetail,
            models::service_orders::OrderClient,
            models::service_orders::OrderEquipment,
            models::service_orders::FormOptions,
            models::service_orders::CreateServiceOrderPayload,
            models::service_orders::UpdateServiceOrderPayload,

            // --- Attachments ---
            models::attachments::MediaFile,
            models::attachments::Signature,
            models::attachments::CreateMediaFilePayload,
            models::attachments::CreateSignaturePayload,

            // --- Technicians ---
            models::technicians::UserType,
            models::technicians::TechnicianStatus,
            models::technicians::Profile,
            models::technicians::TechnicianOption,
            models::technicians::CreateTechnicianPayload,
            models::technicians::UpdateTechnicianPayload,
            models::technicians::ResetPasswordPayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::Dashboard,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação, sessão e registro"),
        (name = "Clients", description = "Cadastro de clientes"),
        (name = "Equipment", description = "Equipamentos dos clientes"),
        (name = "ServiceOrders", description = "Ordens de serviço e impressão"),
        (name = "Attachments", description = "Fotos e assinaturas das OS"),
        (name = "Technicians", description = "Administração da equipe (somente admin)"),
        (name = "Dashboard", description = "Indicadores do painel")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme("api_jwt", SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_the_admin_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/technicians/{id}/toggle-status"));
        assert!(doc.paths.paths.contains_key("/api/service-orders/{id}/print"));
    }
}
