//! DTOs for user endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::dto::pagination::PaginationMeta;
use crate::api::dto::ratings::RatingItem;
use crate::domain::entities::User;

/// Public view of a user. Credentials are never serialized.
#[derive(Debug, Serialize)]
pub struct UserItem {
    pub id: i64,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub zipcode: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserItem {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            age: user.age,
            zipcode: user.zipcode,
            created_at: user.created_at,
        }
    }
}

/// Paginated list of users.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<UserItem>,
}

/// A user together with every rating they have made.
#[derive(Debug, Serialize)]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub user: UserItem,
    pub ratings: Vec<RatingItem>,
}
