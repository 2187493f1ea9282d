//! PostgreSQL implementation of recipe repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{
    IngredientAmount, NewRecipe, Recipe, RecipeFilter, RecipeIngredient, RecipeOwner, RecipePatch,
    RecipeSummary, Tag, User, UserProfile,
};
use crate::domain::repositories::RecipeRepository;
use crate::error::AppError;

use super::pg_tag_repository::TagRow;

/// PostgreSQL repository for recipes.
///
/// Recipes are hydrated in three queries: the recipe rows with author and
/// viewer flags, then the tags and the ingredient lines of every returned
/// recipe at once.
pub struct PgRecipeRepository {
    pool: Arc<PgPool>,
}

impl PgRecipeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

const RECIPE_SELECT: &str = r#"
    SELECT r.id, r.name, r.text, r.cooking_time, r.image, r.pub_date,
           u.id AS author_id, u.email AS author_email, u.username AS author_username,
           u.first_name AS author_first_name, u.last_name AS author_last_name,
           u.avatar AS author_avatar, u.created_at AS author_created_at,
           EXISTS (
               SELECT 1 FROM follows f WHERE f.user_id = "#;

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: i64,
    name: String,
    text: String,
    cooking_time: i32,
    image: String,
    pub_date: DateTime<Utc>,
    author_id: i64,
    author_email: String,
    author_username: String,
    author_first_name: String,
    author_last_name: String,
    author_avatar: Option<String>,
    author_created_at: DateTime<Utc>,
    author_is_subscribed: bool,
    is_favorited: bool,
    is_in_shopping_cart: bool,
}

#[derive(sqlx::FromRow)]
struct RecipeTagRow {
    recipe_id: i64,
    #[sqlx(flatten)]
    tag: TagRow,
}

#[derive(sqlx::FromRow)]
struct RecipeIngredientRow {
    recipe_id: i64,
    id: i64,
    name: String,
    measurement_unit: String,
    amount: i32,
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    name: String,
    image: String,
    cooking_time: i32,
}

impl From<SummaryRow> for RecipeSummary {
    fn from(r: SummaryRow) -> Self {
        RecipeSummary {
            id: r.id,
            name: r.name,
            image: r.image,
            cooking_time: r.cooking_time,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AuthorSummaryRow {
    author_id: i64,
    #[sqlx(flatten)]
    summary: SummaryRow,
}

/// Pushes the recipe select list with viewer-relative flags bound to `viewer_id`.
fn push_recipe_select(qb: &mut QueryBuilder<'_, Postgres>, viewer_id: Option<i64>) {
    qb.push(RECIPE_SELECT);
    qb.push_bind(viewer_id);
    qb.push(
        r#" AND f.author_id = u.id) AS author_is_subscribed,
           EXISTS (SELECT 1 FROM favorites fv WHERE fv.recipe_id = r.id AND fv.user_id = "#,
    );
    qb.push_bind(viewer_id);
    qb.push(
        r#") AS is_favorited,
           EXISTS (SELECT 1 FROM shopping_cart sc WHERE sc.recipe_id = r.id AND sc.user_id = "#,
    );
    qb.push_bind(viewer_id);
    qb.push(
        r#") AS is_in_shopping_cart
    FROM recipes r
    JOIN users u ON u.id = r.author_id
    "#,
    );
}

/// Pushes the `WHERE` clause for `filter`.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &RecipeFilter) {
    qb.push(" WHERE TRUE");

    if let Some(author_id) = filter.author_id {
        qb.push(" AND r.author_id = ").push_bind(author_id);
    }

    if !filter.tags.is_empty() {
        qb.push(
            " AND EXISTS (SELECT 1 FROM recipe_tags rt JOIN tags t ON t.id = rt.tag_id \
             WHERE rt.recipe_id = r.id AND t.slug = ANY(",
        )
        .push_bind(filter.tags.clone())
        .push("))");
    }

    if filter.only_favorited {
        qb.push(" AND EXISTS (SELECT 1 FROM favorites fv WHERE fv.recipe_id = r.id AND fv.user_id = ")
            .push_bind(filter.viewer_id)
            .push(")");
    }

    if filter.only_in_shopping_cart {
        qb.push(
            " AND EXISTS (SELECT 1 FROM shopping_cart sc WHERE sc.recipe_id = r.id AND sc.user_id = ",
        )
        .push_bind(filter.viewer_id)
        .push(")");
    }
}

impl PgRecipeRepository {
    /// Attaches tags and ingredient lines to recipe rows, keeping row order.
    async fn hydrate(&self, rows: Vec<RecipeRow>) -> Result<Vec<Recipe>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let tag_rows = sqlx::query_as::<_, RecipeTagRow>(
            r#"
            SELECT rt.recipe_id, t.id, t.name, t.slug
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(&ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let ingredient_rows = sqlx::query_as::<_, RecipeIngredientRow>(
            r#"
            SELECT ri.recipe_id, i.id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = ANY($1)
            ORDER BY i.name, i.measurement_unit
            "#,
        )
        .bind(&ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            tags.entry(row.recipe_id).or_default().push(row.tag.into());
        }

        let mut ingredients: HashMap<i64, Vec<RecipeIngredient>> = HashMap::new();
        for row in ingredient_rows {
            ingredients
                .entry(row.recipe_id)
                .or_default()
                .push(RecipeIngredient {
                    id: row.id,
                    name: row.name,
                    measurement_unit: row.measurement_unit,
                    amount: row.amount,
                });
        }

        Ok(rows
            .into_iter()
            .map(|r| Recipe {
                id: r.id,
                tags: tags.remove(&r.id).unwrap_or_default(),
                ingredients: ingredients.remove(&r.id).unwrap_or_default(),
                name: r.name,
                text: r.text,
                cooking_time: r.cooking_time,
                image: r.image,
                author: UserProfile {
                    user: User::new(
                        r.author_id,
                        r.author_email,
                        r.author_username,
                        r.author_first_name,
                        r.author_last_name,
                        r.author_avatar,
                        r.author_created_at,
                    ),
                    is_subscribed: r.author_is_subscribed,
                },
                is_favorited: r.is_favorited,
                is_in_shopping_cart: r.is_in_shopping_cart,
                pub_date: r.pub_date,
            })
            .collect())
    }
}

/// Inserts tag and ingredient associations for a recipe.
async fn insert_associations(
    tx: &mut Transaction<'_, Postgres>,
    recipe_id: i64,
    tags: &[i64],
    ingredients: &[IngredientAmount],
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO recipe_tags (recipe_id, tag_id)
        SELECT $1, tag_id FROM UNNEST($2::BIGINT[]) AS tag_id
        "#,
    )
    .bind(recipe_id)
    .bind(tags)
    .execute(&mut **tx)
    .await?;

    let (ingredient_ids, amounts): (Vec<i64>, Vec<i32>) = ingredients
        .iter()
        .map(|i| (i.ingredient_id, i.amount))
        .unzip();

    sqlx::query(
        r#"
        INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount)
        SELECT $1, ingredient_id, amount
        FROM UNNEST($2::BIGINT[], $3::INTEGER[]) AS lines (ingredient_id, amount)
        "#,
    )
    .bind(recipe_id)
    .bind(&ingredient_ids)
    .bind(&amounts)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn create(&self, new_recipe: NewRecipe) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO recipes (author_id, name, text, cooking_time, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(new_recipe.author_id)
        .bind(&new_recipe.name)
        .bind(&new_recipe.text)
        .bind(new_recipe.cooking_time)
        .bind(&new_recipe.image)
        .fetch_one(&mut *tx)
        .await?;

        insert_associations(&mut tx, id, &new_recipe.tags, &new_recipe.ingredients).await?;

        tx.commit().await?;

        Ok(id)
    }

    async fn update(&self, id: i64, patch: RecipePatch) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE recipes
            SET name = COALESCE($2, name),
                text = COALESCE($3, text),
                cooking_time = COALESCE($4, cooking_time),
                image = COALESCE($5, image)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.text)
        .bind(patch.cooking_time)
        .bind(&patch.image)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Recipe not found",
                serde_json::json!({ "id": id }),
            ));
        }

        sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_associations(&mut tx, id, &patch.tags, &patch.ingredients).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(
        &self,
        id: i64,
        viewer_id: Option<i64>,
    ) -> Result<Option<Recipe>, AppError> {
        let mut qb = QueryBuilder::new("");
        push_recipe_select(&mut qb, viewer_id);
        qb.push(" WHERE r.id = ").push_bind(id);

        let row = qb
            .build_query_as::<RecipeRow>()
            .fetch_optional(self.pool.as_ref())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(self.hydrate(vec![row]).await?.pop())
    }

    async fn find_summary(&self, id: i64) -> Result<Option<RecipeSummary>, AppError> {
        let row = sqlx::query_as::<_, SummaryRow>(
            "SELECT id, name, image, cooking_time FROM recipes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_owner(&self, id: i64) -> Result<Option<RecipeOwner>, AppError> {
        let row: Option<(i64, String)> =
            sqlx::query_as("SELECT author_id, image FROM recipes WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(|(author_id, image)| RecipeOwner { author_id, image }))
    }

    async fn list(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, AppError> {
        let mut qb = QueryBuilder::new("");
        push_recipe_select(&mut qb, filter.viewer_id);
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY r.pub_date DESC, r.id DESC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);

        let rows = qb
            .build_query_as::<RecipeRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        self.hydrate(rows).await
    }

    async fn count(&self, filter: &RecipeFilter) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM recipes r");
        push_filter(&mut qb, filter);

        let count = qb
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn latest_by_authors(
        &self,
        author_ids: &[i64],
        per_author: i64,
    ) -> Result<Vec<(i64, RecipeSummary)>, AppError> {
        if author_ids.is_empty() || per_author <= 0 {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, AuthorSummaryRow>(
            r#"
            SELECT author_id, id, name, image, cooking_time
            FROM (
                SELECT r.author_id, r.id, r.name, r.image, r.cooking_time,
                       ROW_NUMBER() OVER (
                           PARTITION BY r.author_id
                           ORDER BY r.pub_date DESC, r.id DESC
                       ) AS position
                FROM recipes r
                WHERE r.author_id = ANY($1)
            ) ranked
            WHERE position <= $2
            ORDER BY author_id, position
            "#,
        )
        .bind(author_ids)
        .bind(per_author)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| (r.author_id, r.summary.into()))
            .collect())
    }

    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
