mod common;

use foodgram::AppError;
use foodgram::domain::entities::BookmarkKind;
use foodgram::domain::repositories::BookmarkRepository;
use foodgram::infrastructure::persistence::PgBookmarkRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_add_exists_remove(pool: PgPool) {
    let repo = PgBookmarkRepository::new(Arc::new(pool.clone()));
    let user = common::create_test_user(&pool, "reader").await;
    let lunch = common::tag_id(&pool, "lunch").await;
    let rice = common::create_test_ingredient(&pool, "Rice", "g").await;
    let recipe = common::create_test_recipe(&pool, user, "Pilaf", &[lunch], &[(rice, 1)]).await;

    repo.add(BookmarkKind::Favorite, user, recipe).await.unwrap();

    assert!(repo.exists(BookmarkKind::Favorite, user, recipe).await.unwrap());
    assert!(!repo.exists(BookmarkKind::ShoppingCart, user, recipe).await.unwrap());

    assert!(repo.remove(BookmarkKind::Favorite, user, recipe).await.unwrap());
    assert!(!repo.remove(BookmarkKind::Favorite, user, recipe).await.unwrap());
}

#[sqlx::test]
async fn test_add_twice_is_conflict(pool: PgPool) {
    let repo = PgBookmarkRepository::new(Arc::new(pool.clone()));
    let user = common::create_test_user(&pool, "reader").await;
    let lunch = common::tag_id(&pool, "lunch").await;
    let rice = common::create_test_ingredient(&pool, "Rice", "g").await;
    let recipe = common::create_test_recipe(&pool, user, "Pilaf", &[lunch], &[(rice, 1)]).await;
    repo.add(BookmarkKind::ShoppingCart, user, recipe).await.unwrap();

    let result = repo.add(BookmarkKind::ShoppingCart, user, recipe).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_shopping_list_groups_by_name_and_unit(pool: PgPool) {
    let repo = PgBookmarkRepository::new(Arc::new(pool.clone()));
    let user = common::create_test_user(&pool, "reader").await;
    let lunch = common::tag_id(&pool, "lunch").await;
    let sugar = common::create_test_ingredient(&pool, "Sugar", "g").await;
    let sugar_spoons = common::create_test_ingredient(&pool, "Sugar", "tbsp").await;
    let flour = common::create_test_ingredient(&pool, "Flour", "g").await;
    let cake = common::create_test_recipe(&pool, user, "Cake", &[lunch], &[(sugar, 100), (flour, 300)]).await;
    let pie = common::create_test_recipe(&pool, user, "Pie", &[lunch], &[(sugar, 50), (sugar_spoons, 2)]).await;
    common::add_to_cart(&pool, user, cake).await;
    common::add_to_cart(&pool, user, pie).await;

    let items = repo.shopping_list(user).await.unwrap();

    let lines: Vec<(&str, &str, i64)> = items
        .iter()
        .map(|i| (i.name.as_str(), i.measurement_unit.as_str(), i.amount))
        .collect();
    assert_eq!(
        lines,
        vec![("Flour", "g", 300), ("Sugar", "g", 150), ("Sugar", "tbsp", 2)]
    );
}

#[sqlx::test]
async fn test_shopping_list_empty(pool: PgPool) {
    let repo = PgBookmarkRepository::new(Arc::new(pool.clone()));
    let user = common::create_test_user(&pool, "reader").await;

    assert!(repo.shopping_list(user).await.unwrap().is_empty());
}
