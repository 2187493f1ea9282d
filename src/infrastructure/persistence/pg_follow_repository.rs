//! PostgreSQL implementation of follow repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{FollowedAuthor, User};
use crate::domain::repositories::FollowRepository;
use crate::error::AppError;
use crate::utils::db_error::{is_check_violation, is_unique_violation};

/// PostgreSQL repository for subscriptions between users.
pub struct PgFollowRepository {
    pool: Arc<PgPool>,
}

impl PgFollowRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FollowedAuthorRow {
    id: i64,
    email: String,
    username: String,
    first_name: String,
    last_name: String,
    avatar: Option<String>,
    created_at: DateTime<Utc>,
    recipes_count: i64,
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    async fn create(&self, user_id: i64, author_id: i64) -> Result<(), AppError> {
        sqlx::query("INSERT INTO follows (user_id, author_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(author_id)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    return AppError::conflict(
                        "You are already subscribed to this user",
                        serde_json::json!({ "author_id": author_id }),
                    );
                }
                if is_check_violation(&e) {
                    return AppError::field("author", "You cannot subscribe to yourself");
                }
                e.into()
            })?;

        Ok(())
    }

    async fn delete(&self, user_id: i64, author_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM follows WHERE user_id = $1 AND author_id = $2")
            .bind(user_id)
            .bind(author_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, user_id: i64, author_id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM follows WHERE user_id = $1 AND author_id = $2)",
        )
        .bind(user_id)
        .bind(author_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn list_followed(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<FollowedAuthor>, AppError> {
        let rows = sqlx::query_as::<_, FollowedAuthorRow>(
            r#"
            SELECT u.id, u.email, u.username, u.first_name, u.last_name, u.avatar, u.created_at,
                   (SELECT COUNT(*) FROM recipes r WHERE r.author_id = u.id) AS recipes_count
            FROM follows f
            JOIN users u ON u.id = f.author_id
            WHERE f.user_id = $1
            ORDER BY u.username
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| FollowedAuthor {
                author: User::new(
                    r.id,
                    r.email,
                    r.username,
                    r.first_name,
                    r.last_name,
                    r.avatar,
                    r.created_at,
                ),
                recipes_count: r.recipes_count,
            })
            .collect())
    }

    async fn count_followed(&self, user_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
