mod common;

use sqlx::PgPool;

#[sqlx::test]
async fn test_list_seeded_tags(pool: PgPool) {
    let server = common::create_test_server(pool);

    let response = server.get("/api/tags").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let slugs: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs.len(), 3);
    assert!(slugs.contains(&"breakfast"));
    assert!(slugs.contains(&"lunch"));
    assert!(slugs.contains(&"dinner"));
}

#[sqlx::test]
async fn test_get_tag(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let id = common::tag_id(&pool, "dinner").await;

    let response = server.get(&format!("/api/tags/{id}")).await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["id"], id);
    assert_eq!(json["slug"], "dinner");

    server.get("/api/tags/9999").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_search_ingredients_by_prefix(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    common::create_test_ingredient(&pool, "Sugar", "g").await;
    common::create_test_ingredient(&pool, "sugar syrup", "ml").await;
    common::create_test_ingredient(&pool, "Brown sugar", "g").await;

    let json = server
        .get("/api/ingredients?name=SUG")
        .await
        .json::<serde_json::Value>();

    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(!names.contains(&"Brown sugar"));
}

#[sqlx::test]
async fn test_search_ingredients_escapes_wildcards(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    common::create_test_ingredient(&pool, "Sugar", "g").await;

    let json = server
        .get("/api/ingredients?name=%25")
        .await
        .json::<serde_json::Value>();

    assert!(json.as_array().unwrap().is_empty());
}

#[sqlx::test]
async fn test_list_all_ingredients(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    common::create_test_ingredient(&pool, "Salt", "g").await;
    common::create_test_ingredient(&pool, "Milk", "ml").await;

    let json = server.get("/api/ingredients").await.json::<serde_json::Value>();

    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["name"], "Milk");
    assert_eq!(json[0]["measurement_unit"], "ml");
}

#[sqlx::test]
async fn test_get_ingredient(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let id = common::create_test_ingredient(&pool, "Salt", "g").await;

    let response = server.get(&format!("/api/ingredients/{id}")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["name"], "Salt");

    server
        .get("/api/ingredients/9999")
        .await
        .assert_status_not_found();
}
