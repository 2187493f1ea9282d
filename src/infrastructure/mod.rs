//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and file storage.
//!
//! # Modules
//!
//! - [`media`] - Uploaded image storage (filesystem and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations

pub mod media;
pub mod persistence;
