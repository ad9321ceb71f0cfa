//! Reference data routes: foods, recipes, exercises and templates

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use fittrack_shared::catalog::{
    Exercise, ExerciseCategory, Food, FoodCategory, Recipe, WorkoutTemplate,
};
use fittrack_shared::nutrition::{calculate_recipe_nutrition, RecipeNutrition};
use fittrack_shared::validation::validate_request;
use fittrack_shared::{Catalog, ExerciseSearchQuery, FoodSearchQuery};

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(search_foods))
        .route("/foods/:id", get(get_food))
        .route("/recipes", get(list_recipes))
        .route("/recipes/:id/nutrition", get(get_recipe_nutrition))
        .route("/exercises", get(search_exercises))
        .route("/exercises/:id", get(get_exercise))
        .route("/templates", get(list_templates))
}

fn parse_category<T: std::str::FromStr<Err = String>>(raw: Option<&str>) -> ApiResult<Option<T>> {
    raw.map(|value| {
        value.parse::<T>().map_err(|message| ApiError::InvalidField {
            field: "category".to_string(),
            message,
        })
    })
    .transpose()
}

/// GET /api/v1/catalog/foods?q=&category=
async fn search_foods(_auth: AuthUser, Query(query): Query<FoodSearchQuery>) -> ApiResult<Json<Vec<Food>>> {
    validate_request(&query)?;
    let category = parse_category::<FoodCategory>(query.category.as_deref())?;

    let foods = Catalog::builtin()
        .search_foods(query.q.as_deref().unwrap_or(""))
        .into_iter()
        .filter(|f| category.map_or(true, |c| f.category == c))
        .cloned()
        .collect();
    Ok(Json(foods))
}

/// GET /api/v1/catalog/foods/:id
async fn get_food(_auth: AuthUser, Path(id): Path<String>) -> ApiResult<Json<Food>> {
    Catalog::builtin()
        .food(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Food '{}' not found", id)))
}

/// GET /api/v1/catalog/recipes
async fn list_recipes(_auth: AuthUser) -> Json<Vec<Recipe>> {
    Json(Catalog::builtin().recipes().to_vec())
}

/// GET /api/v1/catalog/recipes/:id/nutrition
async fn get_recipe_nutrition(_auth: AuthUser, Path(id): Path<String>) -> ApiResult<Json<RecipeNutrition>> {
    let catalog = Catalog::builtin();
    let recipe = catalog
        .recipe(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Recipe '{}' not found", id)))?;
    Ok(Json(calculate_recipe_nutrition(recipe, catalog)))
}

/// GET /api/v1/catalog/exercises?q=&category=&muscle=
async fn search_exercises(
    _auth: AuthUser,
    Query(query): Query<ExerciseSearchQuery>,
) -> ApiResult<Json<Vec<Exercise>>> {
    validate_request(&query)?;
    let category = parse_category::<ExerciseCategory>(query.category.as_deref())?;
    let muscle = query.muscle.as_deref().map(str::trim).filter(|m| !m.is_empty());

    let exercises = Catalog::builtin()
        .search_exercises(query.q.as_deref().unwrap_or(""))
        .into_iter()
        .filter(|e| category.map_or(true, |c| e.category == c))
        .filter(|e| muscle.map_or(true, |m| e.targets_muscle(m)))
        .cloned()
        .collect();
    Ok(Json(exercises))
}

/// GET /api/v1/catalog/exercises/:id
async fn get_exercise(_auth: AuthUser, Path(id): Path<String>) -> ApiResult<Json<Exercise>> {
    Catalog::builtin()
        .exercise(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Exercise '{}' not found", id)))
}

/// GET /api/v1/catalog/templates
async fn list_templates(_auth: AuthUser) -> Json<Vec<WorkoutTemplate>> {
    Json(Catalog::builtin().templates().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(
            parse_category::<FoodCategory>(Some("Fruits")).unwrap(),
            Some(FoodCategory::Fruits)
        );
        assert_eq!(parse_category::<FoodCategory>(None).unwrap(), None);
        assert!(matches!(
            parse_category::<ExerciseCategory>(Some("juggling")),
            Err(ApiError::InvalidField { .. })
        ));
    }
}
