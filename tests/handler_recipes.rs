mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

async fn recipe_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await
        .unwrap()
}

fn recipe_body(tags: &[i64], ingredients: &[(i64, i32)]) -> serde_json::Value {
    json!({
        "ingredients": ingredients
            .iter()
            .map(|(id, amount)| json!({ "id": id, "amount": amount }))
            .collect::<Vec<_>>(),
        "tags": tags,
        "image": common::PIXEL_PNG,
        "name": "Porridge",
        "text": "Boil the oats.",
        "cooking_time": 10,
    })
}

#[sqlx::test]
async fn test_create_recipe(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let (author, token) = common::create_logged_in_user(&pool, &server, "chef").await;
    let breakfast = common::tag_id(&pool, "breakfast").await;
    let oats = common::create_test_ingredient(&pool, "Oats", "g").await;

    let response = server
        .post("/api/recipes")
        .authorization_bearer(&token)
        .json(&recipe_body(&[breakfast], &[(oats, 50)]))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["name"], "Porridge");
    assert_eq!(json["author"]["id"], author);
    assert_eq!(json["tags"][0]["slug"], "breakfast");
    assert_eq!(json["ingredients"][0]["name"], "Oats");
    assert_eq!(json["ingredients"][0]["measurement_unit"], "g");
    assert_eq!(json["ingredients"][0]["amount"], 50);
    assert_eq!(json["is_favorited"], false);
    assert_eq!(json["is_in_shopping_cart"], false);
    assert!(
        json["image"]
            .as_str()
            .unwrap()
            .starts_with("http://testserver/media/recipes/images/")
    );
}

#[sqlx::test]
async fn test_create_recipe_requires_auth(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let breakfast = common::tag_id(&pool, "breakfast").await;
    let oats = common::create_test_ingredient(&pool, "Oats", "g").await;

    server
        .post("/api/recipes")
        .json(&recipe_body(&[breakfast], &[(oats, 50)]))
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_create_recipe_without_tags(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let (_, token) = common::create_logged_in_user(&pool, &server, "chef").await;
    let oats = common::create_test_ingredient(&pool, "Oats", "g").await;

    let response = server
        .post("/api/recipes")
        .authorization_bearer(&token)
        .json(&recipe_body(&[], &[(oats, 50)]))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert!(json["error"]["details"].get("tags").is_some());
    assert_eq!(recipe_count(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_recipe_duplicate_ingredients(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let (_, token) = common::create_logged_in_user(&pool, &server, "chef").await;
    let breakfast = common::tag_id(&pool, "breakfast").await;
    let oats = common::create_test_ingredient(&pool, "Oats", "g").await;

    let response = server
        .post("/api/recipes")
        .authorization_bearer(&token)
        .json(&recipe_body(&[breakfast], &[(oats, 50), (oats, 20)]))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert!(json["error"]["details"].get("ingredients").is_some());
    assert_eq!(recipe_count(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_recipe_unknown_references(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let (_, token) = common::create_logged_in_user(&pool, &server, "chef").await;

    let response = server
        .post("/api/recipes")
        .authorization_bearer(&token)
        .json(&recipe_body(&[9999], &[(8888, 1)]))
        .await;

    response.assert_status_bad_request();
    let details = &response.json::<serde_json::Value>()["error"]["details"];
    assert!(details.get("tags").is_some());
    assert!(details.get("ingredients").is_some());
    assert_eq!(recipe_count(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_recipe_zero_cooking_time(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let (_, token) = common::create_logged_in_user(&pool, &server, "chef").await;
    let breakfast = common::tag_id(&pool, "breakfast").await;
    let oats = common::create_test_ingredient(&pool, "Oats", "g").await;

    let mut body = recipe_body(&[breakfast], &[(oats, 50)]);
    body["cooking_time"] = json!(0);

    server
        .post("/api/recipes")
        .authorization_bearer(&token)
        .json(&body)
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_get_recipe(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let author = common::create_test_user(&pool, "chef").await;
    let lunch = common::tag_id(&pool, "lunch").await;
    let rice = common::create_test_ingredient(&pool, "Rice", "g").await;
    let id = common::create_test_recipe(&pool, author, "Pilaf", &[lunch], &[(rice, 200)]).await;

    let response = server.get(&format!("/api/recipes/{id}")).await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["id"], id);
    assert_eq!(json["name"], "Pilaf");
    assert_eq!(json["author"]["username"], "chef");
    assert_eq!(json["ingredients"][0]["amount"], 200);
}

#[sqlx::test]
async fn test_get_missing_recipe(pool: PgPool) {
    let server = common::create_test_server(pool);

    server
        .get("/api/recipes/9999")
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_update_recipe_by_author(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let (author, token) = common::create_logged_in_user(&pool, &server, "chef").await;
    let lunch = common::tag_id(&pool, "lunch").await;
    let dinner = common::tag_id(&pool, "dinner").await;
    let rice = common::create_test_ingredient(&pool, "Rice", "g").await;
    let salt = common::create_test_ingredient(&pool, "Salt", "pinch").await;
    let id = common::create_test_recipe(&pool, author, "Pilaf", &[lunch], &[(rice, 200)]).await;

    let response = server
        .patch(&format!("/api/recipes/{id}"))
        .authorization_bearer(&token)
        .json(&json!({
            "tags": [dinner],
            "ingredients": [{ "id": salt, "amount": 2 }],
            "name": "Evening pilaf",
        }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["name"], "Evening pilaf");
    assert_eq!(json["text"], "Mix and cook");
    assert_eq!(json["tags"].as_array().unwrap().len(), 1);
    assert_eq!(json["tags"][0]["slug"], "dinner");
    assert_eq!(json["ingredients"].as_array().unwrap().len(), 1);
    assert_eq!(json["ingredients"][0]["name"], "Salt");
}

#[sqlx::test]
async fn test_update_recipe_by_stranger_is_forbidden(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let author = common::create_test_user(&pool, "chef").await;
    let (_, token) = common::create_logged_in_user(&pool, &server, "stranger").await;
    let lunch = common::tag_id(&pool, "lunch").await;
    let rice = common::create_test_ingredient(&pool, "Rice", "g").await;
    let id = common::create_test_recipe(&pool, author, "Pilaf", &[lunch], &[(rice, 200)]).await;

    server
        .patch(&format!("/api/recipes/{id}"))
        .authorization_bearer(&token)
        .json(&json!({
            "tags": [lunch],
            "ingredients": [{ "id": rice, "amount": 1 }],
            "name": "Mine now",
        }))
        .await
        .assert_status_forbidden();

    server
        .delete(&format!("/api/recipes/{id}"))
        .authorization_bearer(&token)
        .await
        .assert_status_forbidden();
}

#[sqlx::test]
async fn test_delete_recipe(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let (author, token) = common::create_logged_in_user(&pool, &server, "chef").await;
    let lunch = common::tag_id(&pool, "lunch").await;
    let rice = common::create_test_ingredient(&pool, "Rice", "g").await;
    let id = common::create_test_recipe(&pool, author, "Pilaf", &[lunch], &[(rice, 200)]).await;
    common::add_favorite(&pool, author, id).await;

    server
        .delete(&format!("/api/recipes/{id}"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(recipe_count(&pool).await, 0);
    server
        .get(&format!("/api/recipes/{id}"))
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_list_recipes_newest_first(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let author = common::create_test_user(&pool, "chef").await;
    let lunch = common::tag_id(&pool, "lunch").await;
    let rice = common::create_test_ingredient(&pool, "Rice", "g").await;
    let first = common::create_test_recipe(&pool, author, "First", &[lunch], &[(rice, 1)]).await;
    let second = common::create_test_recipe(&pool, author, "Second", &[lunch], &[(rice, 1)]).await;

    let response = server.get("/api/recipes").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["count"], 2);
    assert_eq!(json["results"][0]["id"], second);
    assert_eq!(json["results"][1]["id"], first);
}

#[sqlx::test]
async fn test_list_recipes_by_tags_and_author(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let chef = common::create_test_user(&pool, "chef").await;
    let cook = common::create_test_user(&pool, "cook").await;
    let breakfast = common::tag_id(&pool, "breakfast").await;
    let lunch = common::tag_id(&pool, "lunch").await;
    let dinner = common::tag_id(&pool, "dinner").await;
    let rice = common::create_test_ingredient(&pool, "Rice", "g").await;

    let morning = common::create_test_recipe(&pool, chef, "Morning", &[breakfast], &[(rice, 1)]).await;
    let noon = common::create_test_recipe(&pool, cook, "Noon", &[lunch, breakfast], &[(rice, 1)]).await;
    common::create_test_recipe(&pool, chef, "Night", &[dinner], &[(rice, 1)]).await;

    let json = server
        .get("/api/recipes?tags=breakfast&tags=lunch")
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["count"], 2);
    let ids: Vec<i64> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&morning));
    assert!(ids.contains(&noon));

    let json = server
        .get(&format!("/api/recipes?author={chef}&tags=breakfast"))
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["id"], morning);
}

#[sqlx::test]
async fn test_list_recipes_viewer_filters(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let author = common::create_test_user(&pool, "chef").await;
    let (reader, token) = common::create_logged_in_user(&pool, &server, "reader").await;
    let lunch = common::tag_id(&pool, "lunch").await;
    let rice = common::create_test_ingredient(&pool, "Rice", "g").await;
    let liked = common::create_test_recipe(&pool, author, "Liked", &[lunch], &[(rice, 1)]).await;
    let bought = common::create_test_recipe(&pool, author, "Bought", &[lunch], &[(rice, 1)]).await;
    common::add_favorite(&pool, reader, liked).await;
    common::add_to_cart(&pool, reader, bought).await;

    let json = server
        .get("/api/recipes?is_favorited=1")
        .authorization_bearer(&token)
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["id"], liked);
    assert_eq!(json["results"][0]["is_favorited"], true);

    let json = server
        .get("/api/recipes?is_in_shopping_cart=1")
        .authorization_bearer(&token)
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["id"], bought);
    assert_eq!(json["results"][0]["is_in_shopping_cart"], true);

    let json = server
        .get("/api/recipes?is_favorited=1")
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["count"], 2);
}

#[sqlx::test]
async fn test_list_recipes_pagination_links(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let author = common::create_test_user(&pool, "chef").await;
    let lunch = common::tag_id(&pool, "lunch").await;
    let rice = common::create_test_ingredient(&pool, "Rice", "g").await;
    for i in 0..7 {
        common::create_test_recipe(&pool, author, &format!("Dish {i}"), &[lunch], &[(rice, 1)]).await;
    }

    let json = server
        .get("/api/recipes?tags=lunch")
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["count"], 7);
    assert_eq!(json["results"].as_array().unwrap().len(), 6);
    assert_eq!(json["next"], "http://testserver/api/recipes?tags=lunch&page=2");

    let json = server
        .get("/api/recipes?page=5")
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["count"], 7);
    assert!(json["results"].as_array().unwrap().is_empty());
}

#[sqlx::test]
async fn test_list_recipes_rejects_bad_author(pool: PgPool) {
    let server = common::create_test_server(pool);

    server
        .get("/api/recipes?author=abc")
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_get_short_link(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let author = common::create_test_user(&pool, "chef").await;
    let lunch = common::tag_id(&pool, "lunch").await;
    let rice = common::create_test_ingredient(&pool, "Rice", "g").await;
    let id = common::create_test_recipe(&pool, author, "Pilaf", &[lunch], &[(rice, 1)]).await;

    let response = server.get(&format!("/api/recipes/{id}/get-link")).await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["short-link"],
        format!("http://testserver/s/{id}")
    );

    server
        .get("/api/recipes/9999/get-link")
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_list_recipes_rejects_unreachable_page(pool: PgPool) {
    let server = common::create_test_server(pool);

    let response = server.get("/api/recipes?page=9223372036854775807").await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(json["error"]["details"].get("page").is_some());
}

#[sqlx::test]
async fn test_recipe_path_must_be_numeric(pool: PgPool) {
    let server = common::create_test_server(pool);

    let response = server.get("/api/recipes/abc").await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}
