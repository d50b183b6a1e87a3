// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProfileRepository, UserRepository},
    models::{
        auth::{Claims, LoginUserPayload, RegisterUserPayload, SessionContext, User, normalize_email},
        technicians::{NewProfile, TechnicianStatus, UserType},
    },
};

/// Hash bcrypt fora do runtime assíncrono.
pub(crate) async fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

async fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let password_clone = password.to_owned();
    let password_hash_clone = password_hash.to_owned();

    // Executa a verificação em um thread separado
    let is_valid = tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
    Ok(is_valid)
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    profile_repo: Arc<dyn ProfileRepository>,
    jwt_secret: String,
    session_ttl: Duration,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        profile_repo: Arc<dyn ProfileRepository>,
        jwt_secret: String,
        session_ttl: Duration,
        bcrypt_cost: u32,
    ) -> Self {
        Self { user_repo, profile_repo, jwt_secret, session_ttl, bcrypt_cost }
    }

    /// Auto-cadastro: a conta nasce com perfil `admin` (o dono da assistência).
    pub async fn register(&self, payload: RegisterUserPayload) -> Result<String, AppError> {
        let email = normalize_email(&payload.email);
        let hashed_password = hash_password(&payload.password, self.bcrypt_cost).await?;

        let profile = NewProfile {
            name: payload.name.trim().to_string(),
            phone: None,
            position: None,
            user_type: UserType::Admin,
            created_by: None,
        };
        let (user, _) = self
            .user_repo
            .create_account(None, &email, &hashed_password, profile)
            .await?;

        tracing::info!(user_id = %user.id, "nova conta registrada");
        self.issue_token(user.id).await
    }

    pub async fn login(&self, payload: LoginUserPayload) -> Result<String, AppError> {
        let email = normalize_email(&payload.email);
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&payload.password, &user.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        let profile = self
            .profile_repo
            .find_by_user_id(user.id)
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        if profile.status == TechnicianStatus::Inactive {
            return Err(AppError::AccountInactive);
        }

        self.issue_token(user.id).await
    }

    /// Valida o token e monta o contexto da requisição. A sessão precisa
    /// existir, não estar revogada nem expirada, e o perfil precisa estar ativo.
    pub async fn authenticate(&self, token: &str) -> Result<SessionContext, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;
        let claims = token_data.claims;

        let session = self
            .user_repo
            .find_session(claims.sid)
            .await?
            .filter(|s| s.user_id == claims.sub && s.is_active(Utc::now()))
            .ok_or(AppError::InvalidToken)?;

        let user: User = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;
        let profile = self
            .profile_repo
            .find_by_user_id(user.id)
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        if profile.status == TechnicianStatus::Inactive {
            return Err(AppError::AccountInactive);
        }

        Ok(SessionContext { session_id: session.id, user, profile })
    }

    /// Troca a sessão atual por uma nova.
    pub async fn refresh(&self, session: &SessionContext) -> Result<String, AppError> {
        self.user_repo.revoke_session(session.session_id).await?;
        self.issue_token(session.user.id).await
    }

    pub async fn logout(&self, session: &SessionContext) -> Result<(), AppError> {
        self.user_repo.revoke_session(session.session_id).await?;
        tracing::debug!(user_id = %session.user.id, "sessão encerrada");
        Ok(())
    }

    async fn issue_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.session_ttl;
        let session = self.user_repo.create_session(user_id, expires_at).await?;

        let claims = Claims {
            sub: user_id,
            sid: session.id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
