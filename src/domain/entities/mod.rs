//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`User`] - A rater, optionally with login credentials
//! - [`Movie`] - A ratable movie
//! - [`Rating`] - One user's score for one movie
//! - [`Session`] - A login session backing a bearer token
//!
//! # Design Pattern
//!
//! Separate structs are used for creation (`NewUser`, `NewMovie`), mirroring
//! the columns the caller supplies rather than those storage assigns.

pub mod movie;
pub mod rating;
pub mod session;
pub mod user;

pub use movie::{Movie, NewMovie};
pub use rating::{Rating, RatingUpsert};
pub use session::Session;
pub use user::{NewUser, PasswordCredentials, User};
