//! Utility functions shared by the server and the admin CLI.
//!
//! - [`credentials`] - Password digests and session tokens
//! - [`db_error`] - Database error classification
//! - [`movielens`] - MovieLens data file parsers used for seeding

pub mod credentials;
pub mod db_error;
pub mod movielens;
