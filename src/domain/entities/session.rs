//! Login session entity.

use chrono::{DateTime, Utc};

/// A login session created by a successful login.
///
/// Only the HMAC of the bearer token is stored; the raw token is handed to the
/// client once.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Returns true if the session has been revoked by a logout.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}
