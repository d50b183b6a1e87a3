//! Backend de gestão de ordens de serviço para assistências técnicas.
//!
//! Camadas, de fora para dentro:
//!
//! - `handlers`: rotas axum (payload, sessão, idioma)
//! - `middleware`: autenticação, contexto de sessão, administrador, idioma
//! - `services`: regras de negócio
//! - `db`: traits de repositório e implementações PostgreSQL (com RLS)
//! - `models`: registros, enums e payloads

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use config::{AppState, Config};
pub use routes::build_router;
