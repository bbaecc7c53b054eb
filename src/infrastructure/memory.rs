//! In-process implementation of every repository trait.
//!
//! Backs the HTTP tests and local experiments. Data lives behind a single
//! `tokio::sync::RwLock`, which gives writes the same read-after-write
//! visibility the PostgreSQL store provides.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{
    Movie, NewMovie, NewUser, Rating, RatingUpsert, Session, User,
};
use crate::domain::repositories::{
    MovieRepository, RatingRepository, SessionRepository, UserRepository,
};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    movies: BTreeMap<i64, Movie>,
    ratings: BTreeMap<(i64, i64), Rating>,
    sessions: BTreeMap<String, Session>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Thread-safe in-memory store.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a user without credentials, the way imported raters are stored.
    pub async fn insert_user(&self, age: Option<i32>, zipcode: Option<String>) -> User {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let user = User::new(id, None, None, age, zipcode, Utc::now());
        tables.users.insert(id, user.clone());
        user
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;

        if tables
            .users
            .values()
            .any(|u| u.email.as_deref() == Some(new_user.email.as_str()))
        {
            return Err(AppError::conflict(
                "Email already registered",
                json!({ "email": new_user.email }),
            ));
        }

        let id = tables.next_id();
        let user = User::new(
            id,
            Some(new_user.email),
            Some(new_user.credentials),
            new_user.age,
            new_user.zipcode,
            Utc::now(),
        );
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.to_lowercase();
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.email.as_deref().is_some_and(|e| e.to_lowercase() == email))
            .cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.users.len() as i64)
    }
}

#[async_trait]
impl MovieRepository for InMemoryStore {
    async fn create(&self, new_movie: NewMovie) -> Result<Movie, AppError> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let movie = Movie::new(id, new_movie.title, new_movie.released_at, new_movie.imdb_url);
        tables.movies.insert(id, movie.clone());
        Ok(movie)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Movie>, AppError> {
        Ok(self.tables.read().await.movies.get(&id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Movie>, AppError> {
        let tables = self.tables.read().await;
        let mut movies: Vec<&Movie> = tables.movies.values().collect();
        movies.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));

        Ok(movies
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.movies.len() as i64)
    }
}

#[async_trait]
impl RatingRepository for InMemoryStore {
    async fn upsert(
        &self,
        user_id: i64,
        movie_id: i64,
        score: i32,
    ) -> Result<RatingUpsert, AppError> {
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables.ratings.get_mut(&(user_id, movie_id)) {
            existing.score = score;
            return Ok(RatingUpsert::Updated(*existing));
        }

        let rating = Rating::new(tables.next_id(), user_id, movie_id, score);
        tables.ratings.insert((user_id, movie_id), rating);
        Ok(RatingUpsert::Created(rating))
    }

    async fn find(&self, user_id: i64, movie_id: i64) -> Result<Option<Rating>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .ratings
            .get(&(user_id, movie_id))
            .copied())
    }

    async fn list_for_movie(&self, movie_id: i64) -> Result<Vec<Rating>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .ratings
            .values()
            .filter(|r| r.movie_id == movie_id)
            .copied()
            .collect())
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Rating>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .ratings
            .range((user_id, i64::MIN)..=(user_id, i64::MAX))
            .map(|(_, r)| *r)
            .collect())
    }

    async fn list_for_users(&self, user_ids: &[i64]) -> Result<Vec<Rating>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .ratings
            .values()
            .filter(|r| user_ids.contains(&r.user_id))
            .copied()
            .collect())
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn create(&self, user_id: i64, token_hash: &str) -> Result<Session, AppError> {
        let mut tables = self.tables.write().await;

        if tables.sessions.contains_key(token_hash) {
            return Err(AppError::conflict("Session already exists", json!({})));
        }

        let session = Session {
            id: tables.next_id(),
            user_id,
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            revoked_at: None,
        };
        tables
            .sessions
            .insert(token_hash.to_string(), session.clone());
        Ok(session)
    }

    async fn find_active(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .sessions
            .get(token_hash)
            .filter(|s| !s.is_revoked())
            .cloned())
    }

    async fn revoke(&self, token_hash: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;

        match tables.sessions.get_mut(token_hash) {
            Some(session) if !session.is_revoked() => {
                session.revoked_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
