//! Helpers for interpreting database constraint violations.

use crate::error::AppError;

/// Returns the name of the unique constraint `e` violated, if any.
pub fn unique_violation_constraint(e: &sqlx::Error) -> Option<&str> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    db_err.constraint()
}

/// Returns true if `e` is a unique constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Returns true if `e` is a check constraint violation.
pub fn is_check_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_check_violation())
}

/// Maps a failed user insert to a field-keyed validation error when the
/// email or username is already taken.
pub fn map_user_write_error(e: sqlx::Error) -> AppError {
    let constraint = unique_violation_constraint(&e).map(str::to_owned);

    match constraint.as_deref() {
        Some("users_email_key") => {
            AppError::field("email", "A user with this email already exists")
        }
        Some("users_username_key") => {
            AppError::field("username", "A user with this username already exists")
        }
        _ => e.into(),
    }
}
