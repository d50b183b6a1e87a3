pub mod attachment_service;
pub mod auth;
pub mod client_service;
pub mod dashboard_service;
pub mod equipment_service;
pub mod print_service;
pub mod service_order_service;
pub mod technician_service;

#[cfg(test)]
pub(crate) mod fixtures;
