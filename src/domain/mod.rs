//! Domain layer containing business entities and logic.
//!
//! Nothing here depends on infrastructure or presentation layers.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`scoring`] - Rating prediction and detail aggregation engine
//!
//! Repository traits define contracts implemented by the infrastructure layer;
//! orchestration lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
pub mod scoring;
