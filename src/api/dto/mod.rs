//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Stored media paths are turned into absolute URLs
//! when a response DTO is built, through a [`MediaUrl`] callback.

pub mod auth;
pub mod health;
pub mod ingredients;
pub mod pagination;
pub mod recipes;
pub mod subscriptions;
pub mod tags;
pub mod users;

/// Maps a stored media path to its public URL.
pub type MediaUrl<'a> = &'a dyn Fn(&str) -> String;
