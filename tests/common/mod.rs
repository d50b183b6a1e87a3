// Infra compartilhada dos testes de API: um armazenamento em memória que
// implementa os traits de repositório (com as mesmas regras de FK RESTRICT
// do banco) e helpers para disparar requisições no router.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use oficina_backend::{
    AppState, Config, build_router,
    common::error::AppError,
    db::{
        AttachmentRepository, ClientRepository, EquipmentRepository, ProfileRepository,
        Repositories, ServiceOrderRepository, UserRepository,
    },
    models::{
        attachments::{MediaFile, NewMediaFile, Signature},
        auth::{Session, User},
        clients::{Client, ClientPatch, NewClient},
        equipment::{Equipment, EquipmentFilter, EquipmentListing, EquipmentPatch, NewEquipment},
        service_orders::{
            NewServiceOrder, OrderFilter, ServiceOrder, ServiceOrderDetail, ServiceOrderPatch,
            ServiceOrderRow,
        },
        technicians::{NewProfile, Profile, ProfilePatch, TechnicianStatus},
    },
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    sessions: Vec<Session>,
    profiles: Vec<Profile>,
    clients: Vec<Client>,
    equipment: Vec<Equipment>,
    orders: Vec<ServiceOrder>,
    media: Vec<MediaFile>,
    signatures: Vec<Signature>,
}

/// Vetores são mantidos em ordem de inserção (= ordem cronológica).
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn client_count(&self) -> usize {
        self.tables.lock().unwrap().clients.len()
    }

    pub fn order_count(&self) -> usize {
        self.tables.lock().unwrap().orders.len()
    }

    fn detail(tables: &Tables, order: &ServiceOrder) -> Option<ServiceOrderDetail> {
        let client = tables.clients.iter().find(|c| c.id == order.client_id)?;
        let equipment = tables.equipment.iter().find(|e| e.id == order.equipment_id)?;
        let technician = tables.profiles.iter().find(|p| p.id == order.technician_id)?;
        Some(ServiceOrderDetail::from(ServiceOrderRow {
            order: order.clone(),
            client_name: client.name.clone(),
            client_phone: client.phone.clone(),
            client_email: client.email.clone(),
            client_address: client.address.clone(),
            equipment_type: equipment.equipment_type.clone(),
            equipment_brand: equipment.brand.clone(),
            equipment_model: equipment.model.clone(),
            equipment_serial_number: equipment.serial_number.clone(),
            technician_name: technician.name.clone(),
        }))
    }

    fn owns_order(tables: &Tables, owner_id: Uuid, order_id: Uuid) -> bool {
        tables.orders.iter().any(|o| o.id == order_id && o.owner_id == owner_id)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_account(
        &self,
        _actor: Option<Uuid>,
        email: &str,
        password_hash: &str,
        profile: NewProfile,
    ) -> Result<(User, Profile), AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == email) {
            return Err(AppError::EmailAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        let profile = Profile {
            id: Uuid::new_v4(),
            user_id: user.id,
            name: profile.name,
            phone: profile.phone,
            position: profile.position,
            status: TechnicianStatus::Active,
            user_type: profile.user_type,
            created_by: profile.created_by,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        tables.profiles.push(profile.clone());
        Ok((user, profile))
    }

    async fn set_password(&self, user_id: Uuid, password_hash: &str) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(AppError::UserNotFound)?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn delete_account(&self, user_id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let profile_ids: Vec<Uuid> = tables
            .profiles
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.id)
            .collect();
        if tables.orders.iter().any(|o| profile_ids.contains(&o.technician_id)) {
            return Err(AppError::TechnicianHasOrders);
        }

        let before = tables.users.len();
        tables.users.retain(|u| u.id != user_id);
        tables.profiles.retain(|p| p.user_id != user_id);
        tables.sessions.retain(|s| s.user_id != user_id);
        Ok(tables.users.len() < before)
    }

    async fn create_session(&self, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<Session, AppError> {
        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
            expires_at,
            revoked_at: None,
        };
        self.tables.lock().unwrap().sessions.push(session.clone());
        Ok(session)
    }

    async fn find_session(&self, id: Uuid) -> Result<Option<Session>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn revoke_session(&self, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        for session in tables.sessions.iter_mut().filter(|s| s.id == id) {
            session.revoked_at.get_or_insert_with(Utc::now);
        }
        Ok(())
    }

    async fn revoke_all_sessions(&self, user_id: Uuid) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        for session in tables.sessions.iter_mut().filter(|s| s.user_id == user_id) {
            session.revoked_at.get_or_insert_with(Utc::now);
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn find_by_id(&self, _actor: Uuid, id: Uuid) -> Result<Option<Profile>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn list_technicians(&self, _actor: Uuid) -> Result<Vec<Profile>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.profiles.iter().rev().filter(|p| p.is_assignable()).cloned().collect())
    }

    async fn list_managed(&self, _actor: Uuid, manager_id: Uuid) -> Result<Vec<Profile>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .profiles
            .iter()
            .rev()
            .filter(|p| p.is_assignable() && p.created_by == Some(manager_id))
            .cloned()
            .collect())
    }

    async fn find_managed(&self, _actor: Uuid, manager_id: Uuid, id: Uuid) -> Result<Option<Profile>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .profiles
            .iter()
            .find(|p| p.id == id && p.is_assignable() && p.created_by == Some(manager_id))
            .cloned())
    }

    async fn update(&self, _actor: Uuid, id: Uuid, patch: ProfilePatch) -> Result<Option<Profile>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(profile) = tables.profiles.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            profile.name = name;
        }
        if let Some(phone) = patch.phone {
            profile.phone = phone;
        }
        if let Some(position) = patch.position {
            profile.position = position;
        }
        if let Some(status) = patch.status {
            profile.status = status;
        }
        profile.updated_at = Utc::now();
        Ok(Some(profile.clone()))
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Client>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut clients: Vec<_> = tables.clients.iter().filter(|c| c.owner_id == owner_id).cloned().collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Client>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.clients.iter().find(|c| c.id == id && c.owner_id == owner_id).cloned())
    }

    async fn create(&self, owner_id: Uuid, client: NewClient) -> Result<Client, AppError> {
        let now = Utc::now();
        let created = Client {
            id: Uuid::new_v4(),
            owner_id,
            name: client.name,
            email: client.email,
            phone: client.phone,
            address: client.address,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().clients.push(created.clone());
        Ok(created)
    }

    async fn update(&self, owner_id: Uuid, id: Uuid, patch: ClientPatch) -> Result<Option<Client>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(client) = tables.clients.iter_mut().find(|c| c.id == id && c.owner_id == owner_id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            client.name = name;
        }
        if let Some(email) = patch.email {
            client.email = email;
        }
        if let Some(phone) = patch.phone {
            client.phone = phone;
        }
        if let Some(address) = patch.address {
            client.address = address;
        }
        client.updated_at = Utc::now();
        Ok(Some(client.clone()))
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.equipment.iter().any(|e| e.client_id == id) {
            return Err(AppError::ClientHasEquipment);
        }
        if tables.orders.iter().any(|o| o.client_id == id) {
            return Err(AppError::ClientHasServiceOrders);
        }
        let before = tables.clients.len();
        tables.clients.retain(|c| !(c.id == id && c.owner_id == owner_id));
        Ok(tables.clients.len() < before)
    }
}

#[async_trait]
impl EquipmentRepository for MemoryStore {
    async fn list(&self, owner_id: Uuid, filter: EquipmentFilter) -> Result<Vec<EquipmentListing>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .equipment
            .iter()
            .rev()
            .filter(|e| e.owner_id == owner_id)
            .filter(|e| filter.client_id.is_none_or(|c| e.client_id == c))
            .map(|e| EquipmentListing {
                equipment: e.clone(),
                client_name: tables
                    .clients
                    .iter()
                    .find(|c| c.id == e.client_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
            })
            .collect())
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Equipment>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.equipment.iter().find(|e| e.id == id && e.owner_id == owner_id).cloned())
    }

    async fn create(&self, owner_id: Uuid, equipment: NewEquipment) -> Result<Equipment, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.clients.iter().any(|c| c.id == equipment.client_id && c.owner_id == owner_id) {
            return Err(AppError::ClientNotFound);
        }
        let now = Utc::now();
        let created = Equipment {
            id: Uuid::new_v4(),
            owner_id,
            client_id: equipment.client_id,
            equipment_type: equipment.equipment_type,
            brand: equipment.brand,
            model: equipment.model,
            serial_number: equipment.serial_number,
            observations: equipment.observations,
            created_at: now,
            updated_at: now,
        };
        tables.equipment.push(created.clone());
        Ok(created)
    }

    async fn update(&self, owner_id: Uuid, id: Uuid, patch: EquipmentPatch) -> Result<Option<Equipment>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(client_id) = patch.client_id {
            let moving = tables.equipment.iter().any(|e| e.id == id && e.client_id != client_id);
            if moving && tables.orders.iter().any(|o| o.equipment_id == id) {
                return Err(AppError::EquipmentInUse);
            }
        }
        let Some(equipment) = tables.equipment.iter_mut().find(|e| e.id == id && e.owner_id == owner_id) else {
            return Ok(None);
        };
        if let Some(client_id) = patch.client_id {
            equipment.client_id = client_id;
        }
        if let Some(equipment_type) = patch.equipment_type {
            equipment.equipment_type = equipment_type;
        }
        if let Some(brand) = patch.brand {
            equipment.brand = brand;
        }
        if let Some(model) = patch.model {
            equipment.model = model;
        }
        if let Some(serial_number) = patch.serial_number {
            equipment.serial_number = serial_number;
        }
        if let Some(observations) = patch.observations {
            equipment.observations = observations;
        }
        equipment.updated_at = Utc::now();
        Ok(Some(equipment.clone()))
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.orders.iter().any(|o| o.equipment_id == id) {
            return Err(AppError::EquipmentInUse);
        }
        let before = tables.equipment.len();
        tables.equipment.retain(|e| !(e.id == id && e.owner_id == owner_id));
        Ok(tables.equipment.len() < before)
    }

    async fn count_for_client(&self, owner_id: Uuid, client_id: Uuid) -> Result<i64, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .equipment
            .iter()
            .filter(|e| e.owner_id == owner_id && e.client_id == client_id)
            .count() as i64)
    }
}

#[async_trait]
impl ServiceOrderRepository for MemoryStore {
    async fn list(&self, owner_id: Uuid, filter: OrderFilter) -> Result<Vec<ServiceOrderDetail>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .orders
            .iter()
            .rev()
            .filter(|o| o.owner_id == owner_id && filter.matches(o))
            .filter_map(|o| Self::detail(&tables, o))
            .collect())
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<ServiceOrderDetail>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .orders
            .iter()
            .find(|o| o.id == id && o.owner_id == owner_id)
            .and_then(|o| Self::detail(&tables, o)))
    }

    async fn create(&self, owner_id: Uuid, order: NewServiceOrder) -> Result<ServiceOrder, AppError> {
        let now = Utc::now();
        let created = ServiceOrder {
            id: Uuid::new_v4(),
            owner_id,
            client_id: order.client_id,
            equipment_id: order.equipment_id,
            technician_id: order.technician_id,
            problem_description: order.problem_description,
            solution_description: order.solution_description,
            value: order.value,
            status: order.status,
            payment_status: order.payment_status,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().orders.push(created.clone());
        Ok(created)
    }

    async fn update(&self, owner_id: Uuid, id: Uuid, patch: ServiceOrderPatch) -> Result<Option<ServiceOrder>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(order) = tables.orders.iter_mut().find(|o| o.id == id && o.owner_id == owner_id) else {
            return Ok(None);
        };
        if let Some(client_id) = patch.client_id {
            order.client_id = client_id;
        }
        if let Some(equipment_id) = patch.equipment_id {
            order.equipment_id = equipment_id;
        }
        if let Some(technician_id) = patch.technician_id {
            order.technician_id = technician_id;
        }
        if let Some(problem) = patch.problem_description {
            order.problem_description = problem;
        }
        if let Some(solution) = patch.solution_description {
            order.solution_description = solution;
        }
        if let Some(value) = patch.value {
            order.value = value;
        }
        if let Some(status) = patch.status {
            order.status = status;
        }
        if let Some(payment_status) = patch.payment_status {
            order.payment_status = payment_status;
        }
        order.updated_at = Utc::now();
        Ok(Some(order.clone()))
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.orders.len();
        tables.orders.retain(|o| !(o.id == id && o.owner_id == owner_id));
        let deleted = tables.orders.len() < before;
        if deleted {
            tables.media.retain(|m| m.service_order_id != id);
            tables.signatures.retain(|s| s.service_order_id != id);
        }
        Ok(deleted)
    }

    async fn count_for_client(&self, owner_id: Uuid, client_id: Uuid) -> Result<i64, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .orders
            .iter()
            .filter(|o| o.owner_id == owner_id && o.client_id == client_id)
            .count() as i64)
    }
}

#[async_trait]
impl AttachmentRepository for MemoryStore {
    async fn list_media(&self, owner_id: Uuid, order_id: Uuid) -> Result<Vec<MediaFile>, AppError> {
        let tables = self.tables.lock().unwrap();
        if !Self::owns_order(&tables, owner_id, order_id) {
            return Ok(Vec::new());
        }
        Ok(tables.media.iter().filter(|m| m.service_order_id == order_id).cloned().collect())
    }

    async fn add_media(&self, _owner_id: Uuid, order_id: Uuid, file: NewMediaFile) -> Result<MediaFile, AppError> {
        let created = MediaFile {
            id: Uuid::new_v4(),
            service_order_id: order_id,
            file_url: file.file_url,
            file_type: file.file_type,
            file_name: file.file_name,
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().media.push(created.clone());
        Ok(created)
    }

    async fn delete_media(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(order_id) = tables.media.iter().find(|m| m.id == id).map(|m| m.service_order_id) else {
            return Ok(false);
        };
        if !Self::owns_order(&tables, owner_id, order_id) {
            return Ok(false);
        }
        tables.media.retain(|m| m.id != id);
        Ok(true)
    }

    async fn list_signatures(&self, owner_id: Uuid, order_id: Uuid) -> Result<Vec<Signature>, AppError> {
        let tables = self.tables.lock().unwrap();
        if !Self::owns_order(&tables, owner_id, order_id) {
            return Ok(Vec::new());
        }
        Ok(tables.signatures.iter().filter(|s| s.service_order_id == order_id).cloned().collect())
    }

    async fn add_signature(&self, _owner_id: Uuid, order_id: Uuid, signature_url: &str) -> Result<Signature, AppError> {
        let created = Signature {
            id: Uuid::new_v4(),
            service_order_id: order_id,
            signature_url: signature_url.to_string(),
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().signatures.push(created.clone());
        Ok(created)
    }

    async fn delete_signature(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(order_id) = tables.signatures.iter().find(|s| s.id == id).map(|s| s.service_order_id) else {
            return Ok(false);
        };
        if !Self::owns_order(&tables, owner_id, order_id) {
            return Ok(false);
        }
        tables.signatures.retain(|s| s.id != id);
        Ok(true)
    }
}

// =============================================================================
//  APP DE TESTE
// =============================================================================

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        jwt_secret: "segredo-de-teste".into(),
        bind_addr: "127.0.0.1:0".into(),
        database_max_connections: 1,
        bcrypt_cost: 4,
        session_ttl_days: 7,
    }
}

pub fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let repos = Repositories {
        users: store.clone(),
        profiles: store.clone(),
        clients: store.clone(),
        equipment: store.clone(),
        service_orders: store.clone(),
        attachments: store.clone(),
    };
    let app_state = AppState::new(&test_config(), repos).expect("estado de teste");
    TestApp { router: build_router(app_state), store }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        if self.text.is_empty() {
            return Value::Null;
        }
        serde_json::from_str(&self.text).expect("corpo JSON")
    }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            content_type,
            text: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Cadastra um dono (perfil admin) e devolve o token.
    pub async fn register_admin(&self, email: &str) -> String {
        let response = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(serde_json::json!({ "email": email, "password": "senha123", "name": "Dono" })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.json()["token"].as_str().unwrap().to_string()
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Cadastra um técnico pela rota de admin; devolve o perfil.
    pub async fn create_technician(&self, admin_token: &str, email: &str, name: &str) -> Value {
        let response = self
            .post(
                "/api/technicians",
                admin_token,
                serde_json::json!({ "email": email, "password": "senha123", "name": name }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.json()
    }

    pub async fn create_client(&self, token: &str, name: &str) -> Value {
        let response = self.post("/api/clients", token, serde_json::json!({ "name": name })).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.json()
    }

    pub async fn create_equipment(&self, token: &str, client_id: &str, kind: &str) -> Value {
        let response = self
            .post("/api/equipment", token, serde_json::json!({ "clientId": client_id, "type": kind }))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.json()
    }
}
