#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use foodgram::infrastructure::media::NullMediaStorage;
use foodgram::routes::{RouterOptions, router};
use foodgram::state::{AppState, HttpSettings};
use foodgram::utils::password::hash_password;

pub const PUBLIC_URL: &str = "http://testserver";
pub const PASSWORD: &str = "correct-horse-battery";

/// 1x1 transparent PNG.
pub const PIXEL_PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(pool),
        Arc::new(NullMediaStorage::new(PUBLIC_URL)),
        "test-signing-secret".to_string(),
        HttpSettings {
            public_url: PUBLIC_URL.to_string(),
            page_size: 6,
        },
    )
}

/// Full application router without the login rate limit, which needs a
/// peer socket address.
pub fn create_test_server(pool: PgPool) -> TestServer {
    let options = RouterOptions {
        rate_limit_login: false,
        ..RouterOptions::new("media", 1024 * 1024)
    };
    let app = router(create_test_state(pool), &options);

    TestServer::new(app).unwrap()
}

pub async fn create_test_user(pool: &PgPool, username: &str) -> i64 {
    let password_hash = hash_password(PASSWORD).unwrap();

    sqlx::query_scalar(
        "INSERT INTO users (email, username, first_name, last_name, password_hash)
         VALUES ($1, $2, 'Test', 'User', $3) RETURNING id",
    )
    .bind(format!("{username}@example.com"))
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Logs in through the API and returns the raw token.
pub async fn login(server: &TestServer, username: &str) -> String {
    let response = server
        .post("/api/auth/token/login")
        .json(&json!({
            "email": format!("{username}@example.com"),
            "password": PASSWORD,
        }))
        .await;

    response.assert_status_ok();
    response.json::<serde_json::Value>()["auth_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Inserts a user and logs them in. Returns `(user_id, token)`.
pub async fn create_logged_in_user(
    pool: &PgPool,
    server: &TestServer,
    username: &str,
) -> (i64, String) {
    let id = create_test_user(pool, username).await;
    let token = login(server, username).await;
    (id, token)
}

pub async fn create_test_ingredient(pool: &PgPool, name: &str, unit: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(unit)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Id of a tag from the seed migration.
pub async fn tag_id(pool: &PgPool, slug: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM tags WHERE slug = $1")
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Inserts a recipe directly, bypassing validation and media storage.
pub async fn create_test_recipe(
    pool: &PgPool,
    author_id: i64,
    name: &str,
    tags: &[i64],
    ingredients: &[(i64, i32)],
) -> i64 {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO recipes (author_id, name, text, cooking_time, image)
         VALUES ($1, $2, 'Mix and cook', 15, 'recipes/images/test.png') RETURNING id",
    )
    .bind(author_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap();

    for tag in tags {
        sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)")
            .bind(id)
            .bind(tag)
            .execute(pool)
            .await
            .unwrap();
    }

    for (ingredient, amount) in ingredients {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES ($1, $2, $3)",
        )
        .bind(id)
        .bind(ingredient)
        .bind(amount)
        .execute(pool)
        .await
        .unwrap();
    }

    id
}

pub async fn add_to_cart(pool: &PgPool, user_id: i64, recipe_id: i64) {
    sqlx::query("INSERT INTO shopping_cart (user_id, recipe_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn add_favorite(pool: &PgPool, user_id: i64, recipe_id: i64) {
    sqlx::query("INSERT INTO favorites (user_id, recipe_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn follow(pool: &PgPool, user_id: i64, author_id: i64) {
    sqlx::query("INSERT INTO follows (user_id, author_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(author_id)
        .execute(pool)
        .await
        .unwrap();
}
