mod common;

use foodgram::domain::entities::NewIngredient;
use foodgram::domain::repositories::IngredientRepository;
use foodgram::infrastructure::persistence::PgIngredientRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn ingredient(name: &str, unit: &str) -> NewIngredient {
    NewIngredient {
        name: name.to_string(),
        measurement_unit: unit.to_string(),
    }
}

#[sqlx::test]
async fn test_bulk_insert_skips_existing(pool: PgPool) {
    let repo = PgIngredientRepository::new(Arc::new(pool.clone()));
    common::create_test_ingredient(&pool, "Salt", "g").await;

    let inserted = repo
        .bulk_insert(vec![
            ingredient("Salt", "g"),
            ingredient("Salt", "pinch"),
            ingredient("Milk", "ml"),
        ])
        .await
        .unwrap();

    assert_eq!(inserted, 2);
    assert_eq!(repo.search(None).await.unwrap().len(), 3);
}

#[sqlx::test]
async fn test_bulk_insert_is_idempotent(pool: PgPool) {
    let repo = PgIngredientRepository::new(Arc::new(pool));
    let batch = vec![ingredient("Salt", "g"), ingredient("Milk", "ml")];

    assert_eq!(repo.bulk_insert(batch.clone()).await.unwrap(), 2);
    assert_eq!(repo.bulk_insert(batch).await.unwrap(), 0);
    assert_eq!(repo.bulk_insert(vec![]).await.unwrap(), 0);
}

#[sqlx::test]
async fn test_search_prefix_case_insensitive(pool: PgPool) {
    let repo = PgIngredientRepository::new(Arc::new(pool.clone()));
    common::create_test_ingredient(&pool, "Milk", "ml").await;
    common::create_test_ingredient(&pool, "milk powder", "g").await;
    common::create_test_ingredient(&pool, "Coconut milk", "ml").await;

    let found = repo.search(Some("MIL".to_string())).await.unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|i| i.name.to_lowercase().starts_with("mil")));
}

#[sqlx::test]
async fn test_find_missing(pool: PgPool) {
    let repo = PgIngredientRepository::new(Arc::new(pool.clone()));
    let salt = common::create_test_ingredient(&pool, "Salt", "g").await;

    let missing = repo.find_missing(&[salt, 9999, 8888]).await.unwrap();

    assert_eq!(missing, vec![9999, 8888]);
    assert!(repo.find_by_id(salt).await.unwrap().is_some());
}
