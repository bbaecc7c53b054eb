//! Registration, login and bearer-token authentication.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::error::AppError;
use crate::utils::credentials::{generate_token, hash_password, hash_token, verify_password};

/// Raw bearer token handed back once at login.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user_id: i64,
}

/// Input for [`AuthService::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub age: Option<i32>,
    pub zipcode: Option<String>,
}

/// Service for accounts and sessions.
///
/// Passwords and session tokens are both hashed with HMAC-SHA256 keyed by
/// `signing_secret`; changing the secret invalidates every stored credential.
pub struct AuthService<U: UserRepository + ?Sized, S: SessionRepository + ?Sized> {
    users: Arc<U>,
    sessions: Arc<S>,
    signing_secret: String,
}

impl<U: UserRepository + ?Sized, S: SessionRepository + ?Sized> AuthService<U, S> {
    pub fn new(users: Arc<U>, sessions: Arc<S>, signing_secret: String) -> Self {
        Self {
            users,
            sessions,
            signing_secret,
        }
    }

    fn invalid_credentials() -> AppError {
        AppError::unauthorized(
            "Invalid email or password",
            json!({ "reason": "invalid_credentials" }),
        )
    }

    /// Creates a user with a salted password digest.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        let email = registration.email.trim().to_lowercase();

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "Email already registered",
                json!({ "email": email }),
            ));
        }

        let credentials = hash_password(&self.signing_secret, &registration.password)?;
        let user = self
            .users
            .create(NewUser {
                email,
                credentials,
                age: registration.age,
                zipcode: registration.zipcode,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Verifies credentials and opens a session.
    ///
    /// Unknown emails, accounts without credentials and wrong passwords all
    /// produce the same [`AppError::Unauthorized`].
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AppError> {
        let email = email.trim().to_lowercase();

        let Some(user) = self.users.find_by_email(&email).await? else {
            metrics::counter!("logins_total", "outcome" => "unknown_email").increment(1);
            return Err(Self::invalid_credentials());
        };

        let verified = match &user.credentials {
            Some(credentials) => verify_password(&self.signing_secret, credentials, password)?,
            None => false,
        };

        if !verified {
            metrics::counter!("logins_total", "outcome" => "rejected").increment(1);
            tracing::warn!(user_id = user.id, "Login rejected");
            return Err(Self::invalid_credentials());
        }

        let token = generate_token()?;
        let token_hash = hash_token(&self.signing_secret, &token)?;
        self.sessions.create(user.id, &token_hash).await?;

        metrics::counter!("logins_total", "outcome" => "success").increment(1);
        tracing::info!(user_id = user.id, "Session opened");

        Ok(IssuedSession {
            token,
            user_id: user.id,
        })
    }

    /// Revokes the session behind `token`. Revoking twice is not an error.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        let token_hash = hash_token(&self.signing_secret, token)?;
        let revoked = self.sessions.revoke(&token_hash).await?;

        tracing::debug!(revoked, "Logout");
        Ok(())
    }

    /// Resolves a bearer token to its user ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for unknown or revoked tokens.
    pub async fn authenticate(&self, token: &str) -> Result<i64, AppError> {
        let token_hash = hash_token(&self.signing_secret, token)?;

        self.sessions
            .find_active(&token_hash)
            .await?
            .map(|session| session.user_id)
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or revoked token" }),
                )
            })
    }
}
