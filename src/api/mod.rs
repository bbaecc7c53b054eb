//! JSON API over the application services.
//!
//! Handlers parse and validate requests, call a service, and map the result
//! to a DTO. Errors surface as [`crate::error::AppError`] envelopes.
//!
//! - [`dto`] - Request and response bodies
//! - [`handlers`] - Endpoint handlers
//! - [`middleware`] - Bearer authentication, rate limiting, tracing
//! - [`routes`] - Route groups by authentication requirement

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
