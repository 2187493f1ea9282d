//! Utility functions shared by the service layer and the admin tool.
//!
//! - [`password`] - Argon2id password hashing
//! - [`base64_image`] - Decoding images submitted as data URIs
//! - [`ingredient_csv`] - Parsing ingredient catalogue files
//! - [`db_error`] - Interpreting database constraint violations

pub mod base64_image;
pub mod db_error;
pub mod ingredient_csv;
pub mod password;
