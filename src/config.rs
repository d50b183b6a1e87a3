// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    common::i18n::I18nStore,
    db::Repositories,
    services::{
        attachment_service::AttachmentService, auth::AuthService, client_service::ClientService,
        dashboard_service::DashboardService, equipment_service::EquipmentService,
        service_order_service::ServiceOrderService, technician_service::TechnicianService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub database_max_connections: u32,
    pub bcrypt_cost: u32,
    pub session_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            session_ttl_days: parse_var("SESSION_TTL_DAYS", 7)?,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} contém um valor inválido: {raw}")),
        Err(_) => Ok(default),
    }
}

pub async fn connect_pool(config: &Config) -> anyhow::Result<PgPool> {
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
        .context("Falha ao conectar ao banco de dados")?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
    Ok(db_pool)
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub i18n_store: Arc<I18nStore>,
    pub auth_service: AuthService,
    pub client_service: ClientService,
    pub equipment_service: EquipmentService,
    pub service_order_service: ServiceOrderService,
    pub technician_service: TechnicianService,
    pub attachment_service: AttachmentService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    /// Monta o gráfico de dependências sobre um conjunto de repositórios.
    pub fn new(config: &Config, repos: Repositories) -> anyhow::Result<Self> {
        let i18n_store = Arc::new(I18nStore::load()?);

        let auth_service = AuthService::new(
            repos.users.clone(),
            repos.profiles.clone(),
            config.jwt_secret.clone(),
            chrono::Duration::days(config.session_ttl_days),
            config.bcrypt_cost,
        );
        let client_service = ClientService::new(
            repos.clients.clone(),
            repos.equipment.clone(),
            repos.service_orders.clone(),
        );
        let equipment_service =
            EquipmentService::new(repos.equipment.clone(), repos.clients.clone());
        let service_order_service = ServiceOrderService::new(
            repos.service_orders.clone(),
            repos.clients.clone(),
            repos.equipment.clone(),
            repos.profiles.clone(),
        );
        let technician_service = TechnicianService::new(
            repos.users.clone(),
            repos.profiles.clone(),
            config.bcrypt_cost,
        );
        let attachment_service =
            AttachmentService::new(repos.service_orders.clone(), repos.attachments.clone());
        let dashboard_service = DashboardService::new(repos.service_orders);

        Ok(Self {
            i18n_store,
            auth_service,
            client_service,
            equipment_service,
            service_order_service,
            technician_service,
            attachment_service,
            dashboard_service,
        })
    }
}
