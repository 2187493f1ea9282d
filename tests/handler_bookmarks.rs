mod common;

use axum::http::{StatusCode, header};
use sqlx::PgPool;

async fn setup_recipe(pool: &PgPool, author: i64, name: &str, sugar: i32) -> i64 {
    let lunch = common::tag_id(pool, "lunch").await;
    let sugar_id: i64 = match sqlx::query_scalar("SELECT id FROM ingredients WHERE name = 'Sugar'")
        .fetch_optional(pool)
        .await
        .unwrap()
    {
        Some(id) => id,
        None => common::create_test_ingredient(pool, "Sugar", "g").await,
    };
    common::create_test_recipe(pool, author, name, &[lunch], &[(sugar_id, sugar)]).await
}

#[sqlx::test]
async fn test_add_favorite(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let author = common::create_test_user(&pool, "chef").await;
    let (_, token) = common::create_logged_in_user(&pool, &server, "reader").await;
    let id = setup_recipe(&pool, author, "Cake", 100).await;

    let response = server
        .post(&format!("/api/recipes/{id}/favorite"))
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["id"], id);
    assert_eq!(json["name"], "Cake");
    assert_eq!(json["cooking_time"], 15);
    assert!(json["image"].as_str().unwrap().starts_with("http://testserver/media/"));

    let detail = server
        .get(&format!("/api/recipes/{id}"))
        .authorization_bearer(&token)
        .await
        .json::<serde_json::Value>();
    assert_eq!(detail["is_favorited"], true);
}

#[sqlx::test]
async fn test_add_favorite_twice_is_conflict(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let author = common::create_test_user(&pool, "chef").await;
    let (_, token) = common::create_logged_in_user(&pool, &server, "reader").await;
    let id = setup_recipe(&pool, author, "Cake", 100).await;

    server
        .post(&format!("/api/recipes/{id}/favorite"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::CREATED);

    server
        .post(&format!("/api/recipes/{id}/favorite"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[sqlx::test]
async fn test_favorite_unknown_recipe(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let (_, token) = common::create_logged_in_user(&pool, &server, "reader").await;

    server
        .post("/api/recipes/9999/favorite")
        .authorization_bearer(&token)
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_favorite_requires_auth(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let author = common::create_test_user(&pool, "chef").await;
    let id = setup_recipe(&pool, author, "Cake", 100).await;

    server
        .post(&format!("/api/recipes/{id}/favorite"))
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_remove_favorite(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let author = common::create_test_user(&pool, "chef").await;
    let (reader, token) = common::create_logged_in_user(&pool, &server, "reader").await;
    let id = setup_recipe(&pool, author, "Cake", 100).await;
    common::add_favorite(&pool, reader, id).await;

    server
        .delete(&format!("/api/recipes/{id}/favorite"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete(&format!("/api/recipes/{id}/favorite"))
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_cart_add_and_remove(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let author = common::create_test_user(&pool, "chef").await;
    let (_, token) = common::create_logged_in_user(&pool, &server, "reader").await;
    let id = setup_recipe(&pool, author, "Cake", 100).await;

    server
        .post(&format!("/api/recipes/{id}/shopping_cart"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::CREATED);

    server
        .post(&format!("/api/recipes/{id}/shopping_cart"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::CONFLICT);

    server
        .delete(&format!("/api/recipes/{id}/shopping_cart"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete(&format!("/api/recipes/{id}/shopping_cart"))
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_download_shopping_list_sums_amounts(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let author = common::create_test_user(&pool, "chef").await;
    let (reader, token) = common::create_logged_in_user(&pool, &server, "reader").await;
    let cake = setup_recipe(&pool, author, "Cake", 100).await;
    let pie = setup_recipe(&pool, author, "Pie", 50).await;
    common::add_to_cart(&pool, reader, cake).await;
    common::add_to_cart(&pool, reader, pie).await;

    let response = server
        .get("/api/recipes/download_shopping_cart")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header(header::CONTENT_TYPE),
        "text/plain; charset=utf-8"
    );
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"shopping_list.txt\""
    );
    assert_eq!(response.text(), "Shopping list\nSugar - 150 (g)\n");
}

#[sqlx::test]
async fn test_download_empty_shopping_list(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let (_, token) = common::create_logged_in_user(&pool, &server, "reader").await;

    let response = server
        .get("/api/recipes/download_shopping_cart")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), "Shopping list\n");
}

#[sqlx::test]
async fn test_download_shopping_list_is_per_user(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let author = common::create_test_user(&pool, "chef").await;
    let other = common::create_test_user(&pool, "other").await;
    let (_, token) = common::create_logged_in_user(&pool, &server, "reader").await;
    let cake = setup_recipe(&pool, author, "Cake", 100).await;
    common::add_to_cart(&pool, other, cake).await;

    let response = server
        .get("/api/recipes/download_shopping_cart")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.text(), "Shopping list\n");
}

#[sqlx::test]
async fn test_download_requires_auth(pool: PgPool) {
    let server = common::create_test_server(pool);

    server
        .get("/api/recipes/download_shopping_cart")
        .await
        .assert_status_unauthorized();
}
