//! Movie entity.

use chrono::NaiveDate;

/// A movie that users can rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub released_at: Option<NaiveDate>,
    pub imdb_url: Option<String>,
}

impl Movie {
    /// Creates a new Movie instance.
    pub fn new(
        id: i64,
        title: String,
        released_at: Option<NaiveDate>,
        imdb_url: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            released_at,
            imdb_url,
        }
    }
}

/// Input data for creating a movie.
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub released_at: Option<NaiveDate>,
    pub imdb_url: Option<String>,
}
