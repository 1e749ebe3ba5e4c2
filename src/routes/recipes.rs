use actix_web::{get, post, web, HttpResponse};
use chrono::NaiveDate;
use serde::Serialize;

use crate::auth::AuthUser;
use crate::cache::Catalog;
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::{Favorite, Recipe};
use crate::query;
use crate::seed;
use crate::suggest::{self as suggest_mod, Suggestion};

#[derive(Debug, Serialize)]
struct SuggestResponse {
    today: NaiveDate,
    smart_suggestions: Vec<Suggestion>,
    all_recipes: Vec<Recipe>,
    favorite_ids: Vec<i32>,
}

#[derive(Debug, Serialize)]
struct ToggleResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct SeedResponse {
    seeded: usize,
}

#[get("/suggest")]
async fn suggest(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, AppError> {
    let owner = auth.user.id;
    let (foods, favorites, recipes) = web::block(move || -> Result<_, AppError> {
        let recipes = catalog.recipes(&pool)?;
        let conn = pool.get()?;
        let foods = query::find_foods_for_user(&conn, owner)?;
        let favorites = query::find_favorite_ids(&conn, owner)?;
        Ok((foods, favorites, recipes))
    })
    .await??;

    let today = super::today();
    let smart_suggestions = suggest_mod::suggest(&foods, &recipes, &favorites, today);
    let mut favorite_ids: Vec<i32> = favorites.iter().copied().collect();
    favorite_ids.sort_unstable();

    Ok(HttpResponse::Ok().json(SuggestResponse {
        today,
        smart_suggestions,
        all_recipes: suggest_mod::favorites_first(recipes, &favorites),
        favorite_ids,
    }))
}

#[post("/favorites/{recipe_id}/toggle")]
async fn toggle_favorite(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    recipe_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let favorite = Favorite {
        user_id: auth.user.id,
        recipe_id: recipe_id.into_inner(),
    };

    let hearted = web::block(move || -> Result<_, AppError> {
        let conn = pool.get()?;
        if !query::recipe_exists(&conn, favorite.recipe_id)? {
            return Err(AppError::NotFound("Recipe"));
        }
        Ok(query::toggle_favorite(&conn, favorite)?)
    })
    .await??;

    let status = if hearted { "hearted" } else { "unhearted" };
    Ok(HttpResponse::Ok().json(ToggleResponse { status }))
}

#[post("/recipes/seed")]
async fn seed_recipes(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, AppError> {
    let (seeded, invalidated) = web::block(move || -> Result<_, AppError> {
        let conn = pool.get()?;
        let seeded = query::replace_recipes(&conn, &seed::seed_recipes())?;
        Ok((seeded, catalog.invalidate()))
    })
    .await??;

    if !invalidated {
        log::error!("catalog re-seeded but the cached copy was not dropped; it is served until it expires");
    }
    log::info!("user {} re-seeded {} recipes", auth.user.id, seeded);
    Ok(HttpResponse::Ok().json(SeedResponse { seeded }))
}
