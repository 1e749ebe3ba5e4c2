use actix_web::{delete, get, post, web, HttpResponse};
use chrono::NaiveDate;
use serde::Serialize;

use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::AppError;
use crate::forms::FoodForm;
use crate::models::Food;
use crate::query;
use crate::stats::ExpiryStatus;

#[derive(Debug, Serialize)]
struct FoodView {
    #[serde(flatten)]
    food: Food,
    days_left: i64,
    status: ExpiryStatus,
}

#[derive(Debug, Serialize)]
struct FoodListResponse {
    today: NaiveDate,
    foods: Vec<FoodView>,
}

/// Loads a food row and checks it belongs to `user_id`.
fn owned_food(
    conn: &diesel::MysqlConnection,
    food_id: i32,
    user_id: i32,
) -> Result<Food, AppError> {
    let food = query::find_food(conn, food_id)?.ok_or(AppError::NotFound("Food"))?;
    food.ensure_owned_by(user_id)?;
    Ok(food)
}

#[get("/foods")]
async fn list_foods(auth: AuthUser, pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let owner = auth.user.id;
    let foods = web::block(move || -> Result<_, AppError> {
        let conn = pool.get()?;
        Ok(query::find_foods_for_user(&conn, owner)?)
    })
    .await??;

    let today = super::today();
    let foods = foods
        .into_iter()
        .map(|food| {
            let days_left = food.days_left(today);
            FoodView {
                food,
                days_left,
                status: ExpiryStatus::from_days_left(days_left),
            }
        })
        .collect();
    Ok(HttpResponse::Ok().json(FoodListResponse { today, foods }))
}

#[post("/foods")]
async fn add_food(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    form: web::Form<FoodForm>,
) -> Result<HttpResponse, AppError> {
    let changes = form.into_inner().parse()?;
    let owner = auth.user.id;

    let food = web::block(move || -> Result<_, AppError> {
        let conn = pool.get()?;
        Ok(query::insert_food(&conn, owner, &changes)?)
    })
    .await??;

    log::info!("user {} added food {} ({})", owner, food.id, food.name);
    Ok(HttpResponse::Created().json(food))
}

#[post("/foods/{id}")]
async fn edit_food(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    food_id: web::Path<i32>,
    form: web::Form<FoodForm>,
) -> Result<HttpResponse, AppError> {
    let changes = form.into_inner().parse()?;
    let food_id = food_id.into_inner();
    let owner = auth.user.id;

    let food = web::block(move || -> Result<_, AppError> {
        let conn = pool.get()?;
        owned_food(&conn, food_id, owner)?;
        Ok(query::update_food(&conn, food_id, &changes)?)
    })
    .await??;

    Ok(HttpResponse::Ok().json(food))
}

#[delete("/foods/{id}")]
async fn delete_food(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    food_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let food_id = food_id.into_inner();
    let owner = auth.user.id;

    web::block(move || -> Result<_, AppError> {
        let conn = pool.get()?;
        owned_food(&conn, food_id, owner)?;
        Ok(query::delete_food(&conn, food_id)?)
    })
    .await??;

    log::info!("user {} deleted food {}", owner, food_id);
    Ok(HttpResponse::NoContent().finish())
}
