use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{StoreRepository, UserRepository},
    models::auth::{AuthResponse, Claims, LoggedUser, Session, StoreRole},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    store_repo: StoreRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        store_repo: StoreRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            store_repo,
            jwt_secret,
            pool,
        }
    }

    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        store_id: Uuid,
        role: StoreRole,
    ) -> Result<AuthResponse, AppError> {
        if self.user_repo.find_by_email(&self.pool, email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        let store = self
            .store_repo
            .find_by_id(&self.pool, store_id)
            .await?
            .ok_or(AppError::NotFound("Loja"))?;

        // Hashing fora da transação (não toca no banco e é pesado para o
        // executor async, então vai para uma thread de bloqueio)
        let password_clone = password.to_owned();
        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // Usuário + vínculo com a loja nascem juntos ou não nascem
        let mut tx = self.pool.begin().await?;

        let user = self
            .user_repo
            .create_user(&mut *tx, name, email, &password_hash)
            .await?;

        self.store_repo
            .add_member(&mut *tx, user.id, store.id, role)
            .await?;

        tx.commit().await?;

        let token = self.create_token(user.id, role, store.id)?;
        tracing::info!("👤 Novo usuário registrado: {}", user.email);

        Ok(AuthResponse {
            token,
            user: LoggedUser {
                id: user.id,
                name: user.name,
                email: user.email,
                role,
                store,
            },
        })
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(&self.pool, email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em uma thread separada
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // O primeiro vínculo do usuário define a loja e o papel do token.
        // Usuário sem loja não tem o que fazer na API.
        let (role, store) = self
            .store_repo
            .find_first_membership(&self.pool, user.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?
            .into_parts();

        let token = self.create_token(user.id, role, store.id)?;

        Ok(AuthResponse {
            token,
            user: LoggedUser {
                id: user.id,
                name: user.name,
                email: user.email,
                role,
                store,
            },
        })
    }

    // Decodifica o token em uma sessão. Puro: nenhuma ida ao banco,
    // o payload do token é a única fonte de id/papel/loja.
    pub fn decode_session(&self, token: &str) -> Result<Session, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(Session {
            user_id: token_data.claims.sub,
            role: token_data.claims.role,
            store_id: token_data.claims.store_id,
        })
    }

    fn create_token(
        &self,
        user_id: Uuid,
        role: StoreRole,
        store_id: Uuid,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            role,
            store_id,
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
