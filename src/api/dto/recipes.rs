//! DTOs for recipes, their filters and short representation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::MediaUrl;
use super::pagination::{PaginationParams, invalid_number};
use super::tags::TagResponse;
use super::users::UserResponse;
use crate::application::services::{RecipeChanges, RecipeDraft};
use crate::domain::entities::{
    IngredientAmount, Recipe, RecipeFilter, RecipeIngredient, RecipeSummary,
};
use crate::error::AppError;

/// Ingredient reference inside a recipe payload.
#[derive(Debug, Deserialize, Validate)]
pub struct IngredientAmountRequest {
    pub id: i64,

    #[validate(range(min = 1, max = 32000, message = "Amount must be between 1 and 32000"))]
    pub amount: i32,
}

impl From<&IngredientAmountRequest> for IngredientAmount {
    fn from(item: &IngredientAmountRequest) -> Self {
        Self {
            ingredient_id: item.id,
            amount: item.amount,
        }
    }
}

/// Payload for `POST /api/recipes`.
///
/// Missing `tags` or `ingredients` deserialize as empty lists so that the
/// service reports them as field errors.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Vec<IngredientAmountRequest>,

    #[serde(default)]
    pub tags: Vec<i64>,

    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,

    #[validate(length(min = 1, max = 256, message = "Name must be 1 to 256 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "This field may not be blank"))]
    pub text: String,

    #[validate(range(min = 1, max = 32000, message = "Cooking time must be between 1 and 32000"))]
    pub cooking_time: i32,
}

impl From<CreateRecipeRequest> for RecipeDraft {
    fn from(request: CreateRecipeRequest) -> Self {
        Self {
            ingredients: request.ingredients.iter().map(Into::into).collect(),
            tags: request.tags,
            image: request.image,
            name: request.name,
            text: request.text,
            cooking_time: request.cooking_time,
        }
    }
}

/// Payload for `PATCH /api/recipes/{id}`.
///
/// Scalars are optional; tags and ingredients replace the previous sets and
/// are required again.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecipeRequest {
    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Vec<IngredientAmountRequest>,

    #[serde(default)]
    pub tags: Vec<i64>,

    #[validate(length(min = 1, message = "Image may not be blank"))]
    pub image: Option<String>,

    #[validate(length(min = 1, max = 256, message = "Name must be 1 to 256 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "This field may not be blank"))]
    pub text: Option<String>,

    #[validate(range(min = 1, max = 32000, message = "Cooking time must be between 1 and 32000"))]
    pub cooking_time: Option<i32>,
}

impl From<UpdateRecipeRequest> for RecipeChanges {
    fn from(request: UpdateRecipeRequest) -> Self {
        Self {
            ingredients: request.ingredients.iter().map(Into::into).collect(),
            tags: request.tags,
            image: request.image,
            name: request.name,
            text: request.text,
            cooking_time: request.cooking_time,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<RecipeIngredient> for RecipeIngredientResponse {
    fn from(line: RecipeIngredient) -> Self {
        Self {
            id: line.id,
            name: line.name,
            measurement_unit: line.measurement_unit,
            amount: line.amount,
        }
    }
}

/// Full recipe representation.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl RecipeResponse {
    pub fn new(recipe: Recipe, media_url: MediaUrl<'_>) -> Self {
        Self {
            id: recipe.id,
            tags: recipe.tags.into_iter().map(Into::into).collect(),
            author: UserResponse::from_profile(recipe.author, media_url),
            ingredients: recipe.ingredients.into_iter().map(Into::into).collect(),
            is_favorited: recipe.is_favorited,
            is_in_shopping_cart: recipe.is_in_shopping_cart,
            name: recipe.name,
            image: media_url(&recipe.image),
            text: recipe.text,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Compact recipe used by favorites, cart and subscriptions.
#[derive(Debug, Clone, Serialize)]
pub struct ShortRecipeResponse {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl ShortRecipeResponse {
    pub fn new(recipe: RecipeSummary, media_url: MediaUrl<'_>) -> Self {
        Self {
            id: recipe.id,
            image: media_url(&recipe.image),
            name: recipe.name,
            cooking_time: recipe.cooking_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

/// Query parameters of `GET /api/recipes`.
///
/// Parsed from the raw query string because `tags` may repeat.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecipeListParams {
    pub pagination: PaginationParams,
    pub author: Option<i64>,
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl RecipeListParams {
    /// Parses `page`, `limit`, `author`, repeated `tags`, `is_favorited`
    /// and `is_in_shopping_cart`. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for non-numeric numbers or flags
    /// other than `0`, `1`, `true` and `false`.
    pub fn parse(query: Option<&str>) -> Result<Self, AppError> {
        let mut params = Self::default();

        for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "page" => params.pagination.page = Some(parse_number("page", &value)?),
                "limit" => params.pagination.limit = Some(parse_number("limit", &value)?),
                "author" => params.author = Some(parse_number("author", &value)?),
                "tags" => {
                    if !value.is_empty() {
                        params.tags.push(value.into_owned());
                    }
                }
                "is_favorited" => params.is_favorited = parse_flag("is_favorited", &value)?,
                "is_in_shopping_cart" => {
                    params.is_in_shopping_cart = parse_flag("is_in_shopping_cart", &value)?
                }
                _ => {}
            }
        }

        Ok(params)
    }

    /// Builds the repository filter for one page.
    pub fn into_filter(self, viewer_id: Option<i64>, offset: i64, limit: i64) -> RecipeFilter {
        RecipeFilter {
            viewer_id,
            author_id: self.author,
            tags: self.tags,
            only_favorited: self.is_favorited,
            only_in_shopping_cart: self.is_in_shopping_cart,
            offset,
            limit,
        }
    }
}

fn parse_number(field: &str, value: &str) -> Result<i64, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid_number(field, value))
}

fn parse_flag(field: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" | "" => Ok(false),
        _ => Err(AppError::field(field, "Expected 0 or 1")),
    }
}
