//! PostgreSQL implementation of ingredient repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Ingredient, NewIngredient};
use crate::domain::repositories::IngredientRepository;
use crate::error::AppError;

/// PostgreSQL repository for the ingredient catalogue.
pub struct PgIngredientRepository {
    pool: Arc<PgPool>,
}

impl PgIngredientRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct IngredientRow {
    id: i64,
    name: String,
    measurement_unit: String,
}

impl From<IngredientRow> for Ingredient {
    fn from(r: IngredientRow) -> Self {
        Ingredient {
            id: r.id,
            name: r.name,
            measurement_unit: r.measurement_unit,
        }
    }
}

/// Escapes `LIKE` metacharacters so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl IngredientRepository for PgIngredientRepository {
    async fn search(&self, name_prefix: Option<String>) -> Result<Vec<Ingredient>, AppError> {
        let pattern = name_prefix.map(|prefix| format!("{}%", escape_like(&prefix.to_lowercase())));

        let rows = sqlx::query_as::<_, IngredientRow>(
            r#"
            SELECT id, name, measurement_unit
            FROM ingredients
            WHERE ($1::TEXT IS NULL OR LOWER(name) LIKE $1)
            ORDER BY name, measurement_unit
            "#,
        )
        .bind(pattern)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, AppError> {
        let row = sqlx::query_as::<_, IngredientRow>(
            "SELECT id, name, measurement_unit FROM ingredients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_missing(&self, ids: &[i64]) -> Result<Vec<i64>, AppError> {
        let missing: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT requested.id
            FROM UNNEST($1::BIGINT[]) WITH ORDINALITY AS requested (id, position)
            WHERE NOT EXISTS (SELECT 1 FROM ingredients i WHERE i.id = requested.id)
            ORDER BY requested.position
            "#,
        )
        .bind(ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(missing)
    }

    async fn bulk_insert(&self, ingredients: Vec<NewIngredient>) -> Result<u64, AppError> {
        if ingredients.is_empty() {
            return Ok(0);
        }

        let (names, units): (Vec<String>, Vec<String>) = ingredients
            .into_iter()
            .map(|i| (i.name, i.measurement_unit))
            .unzip();

        let result = sqlx::query(
            r#"
            INSERT INTO ingredients (name, measurement_unit)
            SELECT * FROM UNNEST($1::TEXT[], $2::TEXT[])
            ON CONFLICT (name, measurement_unit) DO NOTHING
            "#,
        )
        .bind(&names)
        .bind(&units)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }
}
