pub mod attachments;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod equipment;
pub mod service_orders;
pub mod technicians;
