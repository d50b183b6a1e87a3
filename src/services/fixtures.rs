// Registros prontos para os testes dos serviços.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{
    auth::{SessionContext, User},
    clients::Client,
    equipment::Equipment,
    service_orders::{OrderStatus, PaymentStatus, ServiceOrder},
    technicians::{Profile, TechnicianStatus, UserType},
};

pub fn user() -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: "tecnico@oficina.com".into(),
        password_hash: String::new(),
        created_at: now,
        updated_at: now,
    }
}

pub fn profile(user_id: Uuid, user_type: UserType) -> Profile {
    let now = Utc::now();
    Profile {
        id: Uuid::new_v4(),
        user_id,
        name: "Carlos Lima".into(),
        phone: None,
        position: None,
        status: TechnicianStatus::Active,
        user_type,
        created_by: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn session(user_type: UserType) -> SessionContext {
    let user = user();
    let profile = profile(user.id, user_type);
    SessionContext { session_id: Uuid::new_v4(), user, profile }
}

pub fn client(owner_id: Uuid) -> Client {
    let now = Utc::now();
    Client {
        id: Uuid::new_v4(),
        owner_id,
        name: "Ana".into(),
        email: None,
        phone: Some("11999999999".into()),
        address: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn equipment(owner_id: Uuid, client_id: Uuid) -> Equipment {
    let now = Utc::now();
    Equipment {
        id: Uuid::new_v4(),
        owner_id,
        client_id,
        equipment_type: "Notebook".into(),
        brand: Some("Dell".into()),
        model: None,
        serial_number: None,
        observations: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn order(owner_id: Uuid, client_id: Uuid, equipment_id: Uuid, technician_id: Uuid) -> ServiceOrder {
    let now = Utc::now();
    ServiceOrder {
        id: Uuid::new_v4(),
        owner_id,
        client_id,
        equipment_id,
        technician_id,
        problem_description: "Não liga".into(),
        solution_description: None,
        value: None,
        status: OrderStatus::InProgress,
        payment_status: PaymentStatus::Pending,
        created_at: now,
        updated_at: now,
    }
}
