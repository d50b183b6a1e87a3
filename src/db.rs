pub mod attachment_repo;
pub mod client_repo;
pub mod equipment_repo;
pub mod profile_repo;
pub mod service_order_repo;
pub mod user_repo;

use std::sync::Arc;

use sqlx::PgPool;

pub use attachment_repo::{AttachmentRepository, PgAttachmentRepository};
pub use client_repo::{ClientRepository, PgClientRepository};
pub use equipment_repo::{EquipmentRepository, PgEquipmentRepository};
pub use profile_repo::{PgProfileRepository, ProfileRepository};
pub use service_order_repo::{PgServiceOrderRepository, ServiceOrderRepository};
pub use user_repo::{PgUserRepository, UserRepository};

/// Conjunto de repositórios usado para montar o `AppState`.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub equipment: Arc<dyn EquipmentRepository>,
    pub service_orders: Arc<dyn ServiceOrderRepository>,
    pub attachments: Arc<dyn AttachmentRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            profiles: Arc::new(PgProfileRepository::new(pool.clone())),
            clients: Arc::new(PgClientRepository::new(pool.clone())),
            equipment: Arc::new(PgEquipmentRepository::new(pool.clone())),
            service_orders: Arc::new(PgServiceOrderRepository::new(pool.clone())),
            attachments: Arc::new(PgAttachmentRepository::new(pool)),
        }
    }
}
