//! Account registration, login and profile lookup.

use domain::models::user::normalize_email;
use domain::models::User;
use persistence::repositories::UserRepository;
use shared::jwt::{JwtConfig, JwtError};
use shared::password::{hash_password, verify_account_password, PasswordError};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::config::JwtAuthConfig;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// A signed-in user and their access token.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: User,
    pub access_token: String,
    pub expires_in: i64,
}

pub struct AuthService {
    users: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt_config: &JwtAuthConfig) -> Result<Self, AuthError> {
        let jwt = JwtConfig::with_leeway(
            &jwt_config.secret,
            jwt_config.access_token_expiry_secs,
            jwt_config.leeway_secs,
        )?;

        Ok(Self {
            users: UserRepository::new(pool),
            jwt_config: jwt,
        })
    }

    /// Create an account and sign it in.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthResult, AuthError> {
        check_password_strength(password)?;

        let email = normalize_email(email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_password(password)?;

        let user: User = match self.users.create_user(&email, &password_hash, name).await {
            Ok(entity) => entity.into(),
            // Lost a race with a concurrent registration.
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
                return Err(AuthError::EmailAlreadyExists);
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = %user.id, "User registered");
        self.sign_in(user)
    }

    /// Check credentials and issue a fresh token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        let user: Option<User> = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .map(Into::into);

        let stored = user.as_ref().map(|u| u.password_hash.as_str());
        let verified = verify_account_password(password, stored)?;

        match user {
            Some(user) if verified => self.sign_in(user),
            Some(user) => {
                tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
                Err(AuthError::InvalidCredentials)
            }
            None => Err(AuthError::InvalidCredentials),
        }
    }

    /// Profile of the signed-in user.
    pub async fn me(&self, user_id: Uuid) -> Result<User, AuthError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(Into::into)
            .ok_or(AuthError::UserNotFound)
    }

    fn sign_in(&self, user: User) -> Result<AuthResult, AuthError> {
        let (access_token, _jti) = self.jwt_config.generate_access_token(user.id)?;
        Ok(AuthResult {
            user,
            access_token,
            expires_in: self.jwt_config.access_token_expiry_secs,
        })
    }
}

/// Enforces the minimum password length.
pub fn check_password_strength(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}
