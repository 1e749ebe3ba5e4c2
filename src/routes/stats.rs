use actix_web::{get, web, HttpResponse};

use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::AppError;
use crate::query;
use crate::stats::summarize;

#[get("/statistics")]
async fn statistics(auth: AuthUser, pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let owner = auth.user.id;
    let foods = web::block(move || -> Result<_, AppError> {
        let conn = pool.get()?;
        Ok(query::find_foods_for_user(&conn, owner)?)
    })
    .await??;

    Ok(HttpResponse::Ok().json(summarize(foods, super::today())))
}
