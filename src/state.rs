//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, BookmarkService, FollowService, IngredientService, RecipeService, TagService,
    UserService,
};
use crate::infrastructure::media::MediaStorage;
use crate::infrastructure::persistence::{
    PgBookmarkRepository, PgFollowRepository, PgIngredientRepository, PgRecipeRepository,
    PgTagRepository, PgTokenRepository, PgUserRepository,
};

pub type AppAuthService = AuthService<PgTokenRepository, PgUserRepository>;
pub type AppUserService = UserService<PgUserRepository>;
pub type AppFollowService = FollowService<PgFollowRepository, PgUserRepository, PgRecipeRepository>;
pub type AppTagService = TagService<PgTagRepository>;
pub type AppIngredientService = IngredientService<PgIngredientRepository>;
pub type AppRecipeService =
    RecipeService<PgRecipeRepository, PgTagRepository, PgIngredientRepository>;
pub type AppBookmarkService = BookmarkService<PgBookmarkRepository, PgRecipeRepository>;

/// Settings the HTTP layer needs besides the services.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Base URL used for short links and pagination links, no trailing slash.
    pub public_url: String,
    pub page_size: i64,
}

#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub auth_service: Arc<AppAuthService>,
    pub user_service: Arc<AppUserService>,
    pub follow_service: Arc<AppFollowService>,
    pub tag_service: Arc<AppTagService>,
    pub ingredient_service: Arc<AppIngredientService>,
    pub recipe_service: Arc<AppRecipeService>,
    pub bookmark_service: Arc<AppBookmarkService>,
    pub settings: Arc<HttpSettings>,
}

impl AppState {
    /// Wires PostgreSQL repositories into the services.
    pub fn new(
        pool: Arc<PgPool>,
        media: Arc<dyn MediaStorage>,
        token_signing_secret: String,
        settings: HttpSettings,
    ) -> Self {
        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
        let token_repository = Arc::new(PgTokenRepository::new(pool.clone()));
        let tag_repository = Arc::new(PgTagRepository::new(pool.clone()));
        let ingredient_repository = Arc::new(PgIngredientRepository::new(pool.clone()));
        let recipe_repository = Arc::new(PgRecipeRepository::new(pool.clone()));
        let bookmark_repository = Arc::new(PgBookmarkRepository::new(pool.clone()));
        let follow_repository = Arc::new(PgFollowRepository::new(pool.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(
                token_repository,
                user_repository.clone(),
                token_signing_secret,
            )),
            user_service: Arc::new(UserService::new(user_repository.clone(), media.clone())),
            follow_service: Arc::new(FollowService::new(
                follow_repository,
                user_repository,
                recipe_repository.clone(),
            )),
            tag_service: Arc::new(TagService::new(tag_repository.clone())),
            ingredient_service: Arc::new(IngredientService::new(ingredient_repository.clone())),
            recipe_service: Arc::new(RecipeService::new(
                recipe_repository.clone(),
                tag_repository,
                ingredient_repository,
                media,
            )),
            bookmark_service: Arc::new(BookmarkService::new(
                bookmark_repository,
                recipe_repository,
            )),
            settings: Arc::new(settings),
            pool,
        }
    }
}
