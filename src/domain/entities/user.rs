//! User entity representing a registered (or imported) rater.

use chrono::{DateTime, Utc};

/// A user who can rate movies.
///
/// Users imported from a ratings dataset have no email or credentials; only
/// users created through registration can log in.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: Option<String>,
    pub credentials: Option<PasswordCredentials>,
    pub age: Option<i32>,
    pub zipcode: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(
        id: i64,
        email: Option<String>,
        credentials: Option<PasswordCredentials>,
        age: Option<i32>,
        zipcode: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            credentials,
            age,
            zipcode,
            created_at,
        }
    }

    /// Returns true if the user has credentials and can log in.
    pub fn can_log_in(&self) -> bool {
        self.email.is_some() && self.credentials.is_some()
    }
}

/// Salted password digest stored for a user.
///
/// Both fields are lowercase hex. The raw password is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordCredentials {
    pub salt: String,
    pub hash: String,
}

/// Input data for registering a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub credentials: PasswordCredentials,
    pub age: Option<i32>,
    pub zipcode: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> PasswordCredentials {
        PasswordCredentials {
            salt: "00ff".to_string(),
            hash: "abcd".to_string(),
        }
    }

    #[test]
    fn test_registered_user_can_log_in() {
        let user = User::new(
            1,
            Some("ada@example.com".to_string()),
            Some(credentials()),
            Some(36),
            Some("94110".to_string()),
            Utc::now(),
        );

        assert!(user.can_log_in());
    }

    #[test]
    fn test_imported_user_cannot_log_in() {
        let user = User::new(2, None, None, Some(24), Some("85711".to_string()), Utc::now());

        assert!(!user.can_log_in());
    }
}
