//! PostgreSQL implementation of bookmark repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{BookmarkKind, ShoppingListItem};
use crate::domain::repositories::BookmarkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation;

/// PostgreSQL repository for favorites and the shopping cart.
///
/// Both collections share a `(user_id, recipe_id)` primary key; a concurrent
/// duplicate insert surfaces as a unique violation and maps to
/// [`AppError::Conflict`].
pub struct PgBookmarkRepository {
    pool: Arc<PgPool>,
}

impl PgBookmarkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn table(kind: BookmarkKind) -> &'static str {
    match kind {
        BookmarkKind::Favorite => "favorites",
        BookmarkKind::ShoppingCart => "shopping_cart",
    }
}

#[derive(sqlx::FromRow)]
struct ShoppingListRow {
    name: String,
    measurement_unit: String,
    amount: i64,
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
    async fn add(&self, kind: BookmarkKind, user_id: i64, recipe_id: i64) -> Result<(), AppError> {
        let sql = format!(
            "INSERT INTO {} (user_id, recipe_id) VALUES ($1, $2)",
            table(kind)
        );

        sqlx::query(&sql)
            .bind(user_id)
            .bind(recipe_id)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    return AppError::conflict(
                        format!("Recipe is already in {}", kind),
                        serde_json::json!({ "recipe_id": recipe_id }),
                    );
                }
                e.into()
            })?;

        Ok(())
    }

    async fn remove(
        &self,
        kind: BookmarkKind,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<bool, AppError> {
        let sql = format!(
            "DELETE FROM {} WHERE user_id = $1 AND recipe_id = $2",
            table(kind)
        );

        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(recipe_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(
        &self,
        kind: BookmarkKind,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<bool, AppError> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE user_id = $1 AND recipe_id = $2)",
            table(kind)
        );

        let exists: bool = sqlx::query_scalar(&sql)
            .bind(user_id)
            .bind(recipe_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }

    async fn shopping_list(&self, user_id: i64) -> Result<Vec<ShoppingListItem>, AppError> {
        let rows = sqlx::query_as::<_, ShoppingListRow>(
            r#"
            SELECT i.name, i.measurement_unit, SUM(ri.amount)::BIGINT AS amount
            FROM shopping_cart sc
            JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE sc.user_id = $1
            GROUP BY i.name, i.measurement_unit
            ORDER BY i.name, i.measurement_unit
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ShoppingListItem::new(r.name, r.measurement_unit, r.amount))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert_eq!(table(BookmarkKind::Favorite), "favorites");
        assert_eq!(table(BookmarkKind::ShoppingCart), "shopping_cart");
    }
}
