//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, MovieService, RatingService, UserService};
use crate::domain::repositories::{
    MovieRepository, RatingRepository, SessionRepository, UserRepository,
};
use crate::domain::scoring::EngineConfig;
use crate::infrastructure::memory::InMemoryStore;

pub type DynAuthService = AuthService<dyn UserRepository, dyn SessionRepository>;
pub type DynMovieService =
    MovieService<dyn MovieRepository, dyn RatingRepository, dyn UserRepository>;
pub type DynRatingService = RatingService<dyn MovieRepository, dyn RatingRepository>;
pub type DynUserService = UserService<dyn UserRepository, dyn RatingRepository>;

/// Repository handles the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub movies: Arc<dyn MovieRepository>,
    pub ratings: Arc<dyn RatingRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Repositories {
    /// Points every repository at one in-memory store.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            users: store.clone(),
            movies: store.clone(),
            ratings: store.clone(),
            sessions: store,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<DynAuthService>,
    pub movie_service: Arc<DynMovieService>,
    pub rating_service: Arc<DynRatingService>,
    pub user_service: Arc<DynUserService>,
}

impl AppState {
    pub fn new(repositories: Repositories, engine: EngineConfig, signing_secret: String) -> Self {
        let Repositories {
            users,
            movies,
            ratings,
            sessions,
        } = repositories;

        Self {
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                sessions,
                signing_secret,
            )),
            movie_service: Arc::new(MovieService::new(
                movies.clone(),
                ratings.clone(),
                users.clone(),
                engine.aggregator(),
            )),
            rating_service: Arc::new(RatingService::new(
                movies,
                ratings.clone(),
                engine.scale,
            )),
            user_service: Arc::new(UserService::new(users, ratings)),
        }
    }
}
