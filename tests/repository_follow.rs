mod common;

use foodgram::AppError;
use foodgram::domain::repositories::FollowRepository;
use foodgram::infrastructure::persistence::PgFollowRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_create_and_exists(pool: PgPool) {
    let repo = PgFollowRepository::new(Arc::new(pool.clone()));
    let author = common::create_test_user(&pool, "author").await;
    let reader = common::create_test_user(&pool, "reader").await;

    repo.create(reader, author).await.unwrap();

    assert!(repo.exists(reader, author).await.unwrap());
    assert!(!repo.exists(author, reader).await.unwrap());
}

#[sqlx::test]
async fn test_duplicate_follow_is_conflict(pool: PgPool) {
    let repo = PgFollowRepository::new(Arc::new(pool.clone()));
    let author = common::create_test_user(&pool, "author").await;
    let reader = common::create_test_user(&pool, "reader").await;
    repo.create(reader, author).await.unwrap();

    let result = repo.create(reader, author).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_self_follow_rejected_by_database(pool: PgPool) {
    let repo = PgFollowRepository::new(Arc::new(pool.clone()));
    let me = common::create_test_user(&pool, "me_myself").await;

    let result = repo.create(me, me).await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
}

#[sqlx::test]
async fn test_delete(pool: PgPool) {
    let repo = PgFollowRepository::new(Arc::new(pool.clone()));
    let author = common::create_test_user(&pool, "author").await;
    let reader = common::create_test_user(&pool, "reader").await;
    repo.create(reader, author).await.unwrap();

    assert!(repo.delete(reader, author).await.unwrap());
    assert!(!repo.delete(reader, author).await.unwrap());
}

#[sqlx::test]
async fn test_list_followed_with_recipe_counts(pool: PgPool) {
    let repo = PgFollowRepository::new(Arc::new(pool.clone()));
    let boris = common::create_test_user(&pool, "boris").await;
    let anna = common::create_test_user(&pool, "anna").await;
    let reader = common::create_test_user(&pool, "reader").await;
    let lunch = common::tag_id(&pool, "lunch").await;
    let rice = common::create_test_ingredient(&pool, "Rice", "g").await;
    common::create_test_recipe(&pool, boris, "One", &[lunch], &[(rice, 1)]).await;
    common::create_test_recipe(&pool, boris, "Two", &[lunch], &[(rice, 1)]).await;
    common::follow(&pool, reader, boris).await;
    common::follow(&pool, reader, anna).await;

    let followed = repo.list_followed(reader, 0, 10).await.unwrap();

    assert_eq!(repo.count_followed(reader).await.unwrap(), 2);
    assert_eq!(followed[0].author.username, "anna");
    assert_eq!(followed[0].recipes_count, 0);
    assert_eq!(followed[1].author.username, "boris");
    assert_eq!(followed[1].recipes_count, 2);
}
