//! Password digests, session tokens and generated passwords.
//!
//! Everything stored is an HMAC-SHA256 keyed by the server signing secret, so
//! a database dump alone cannot be used to verify guesses offline.

use base64::Engine as _;
use hmac::{Hmac, Mac};
use rand::Rng;
use serde_json::json;
use sha2::Sha256;

use crate::domain::entities::PasswordCredentials;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const SALT_LENGTH_BYTES: usize = 16;
const TOKEN_LENGTH_BYTES: usize = 32;
const GENERATED_PASSWORD_LEN: usize = 24;

fn random_bytes<const N: usize>() -> Result<[u8; N], AppError> {
    let mut buffer = [0u8; N];
    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate random bytes",
            json!({ "reason": e.to_string() }),
        )
    })?;
    Ok(buffer)
}

fn keyed_mac(secret: &str) -> Result<HmacSha256, AppError> {
    HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| {
        AppError::internal("Invalid signing secret", json!({ "reason": e.to_string() }))
    })
}

/// Generates an opaque bearer token: 32 random bytes, URL-safe base64.
pub fn generate_token() -> Result<String, AppError> {
    let bytes = random_bytes::<TOKEN_LENGTH_BYTES>()?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}

/// Hex HMAC of a bearer token; this is what the sessions table stores.
pub fn hash_token(secret: &str, token: &str) -> Result<String, AppError> {
    let mut mac = keyed_mac(secret)?;
    mac.update(token.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

fn password_mac(secret: &str, salt: &[u8], password: &str) -> Result<HmacSha256, AppError> {
    let mut mac = keyed_mac(secret)?;
    mac.update(salt);
    mac.update(password.as_bytes());
    Ok(mac)
}

/// Derives credentials for a new password with a fresh random salt.
pub fn hash_password(secret: &str, password: &str) -> Result<PasswordCredentials, AppError> {
    let salt = random_bytes::<SALT_LENGTH_BYTES>()?;
    let mac = password_mac(secret, &salt, password)?;

    Ok(PasswordCredentials {
        salt: hex::encode(salt),
        hash: hex::encode(mac.finalize().into_bytes()),
    })
}

/// Checks a password against stored credentials in constant time.
///
/// Malformed stored hex never matches.
pub fn verify_password(
    secret: &str,
    credentials: &PasswordCredentials,
    password: &str,
) -> Result<bool, AppError> {
    let (Ok(salt), Ok(expected)) = (
        hex::decode(&credentials.salt),
        hex::decode(&credentials.hash),
    ) else {
        return Ok(false);
    };

    let mac = password_mac(secret, &salt, password)?;
    Ok(mac.verify_slice(&expected).is_ok())
}

/// Generates a random alphanumeric password for service accounts.
pub fn generate_password() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::rng();
    (0..GENERATED_PASSWORD_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
