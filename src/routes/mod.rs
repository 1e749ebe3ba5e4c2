use actix_web::web;
use chrono::{Local, NaiveDate};

mod account;
mod foods;
mod recipes;
mod stats;

pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(account::register)
        .service(account::login)
        .service(account::logout)
        .service(account::account)
        .service(account::change_password)
        .service(foods::list_foods)
        .service(foods::add_food)
        .service(foods::edit_food)
        .service(foods::delete_food)
        .service(recipes::suggest)
        .service(recipes::toggle_favorite)
        .service(recipes::seed_recipes)
        .service(stats::statistics);
}

/// Reference date for expiry calculations, in server local time.
fn today() -> NaiveDate {
    Local::now().date_naive()
}
