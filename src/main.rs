#[macro_use]
extern crate diesel;

use actix_web::{middleware, web, App, HttpServer};

mod auth;
mod cache;
mod config;
mod db;
mod error;
mod forms;
mod models;
mod query;
mod routes;
mod schema;
mod seed;
mod stats;
mod suggest;

use crate::cache::Catalog;
use crate::config::Config;
use crate::error::AppError;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::load();

    // set up database connection pool
    let pool = db::create_pool(&config.database_url)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let redis_pool = match config.redis_url.as_deref() {
        Some(url) => match db::create_redis_pool(url) {
            Ok(pool) => Some(pool),
            Err(e) => {
                log::warn!("invalid REDIS_URL, recipe cache disabled: {}", e);
                None
            }
        },
        None => {
            log::info!("REDIS_URL not set, recipe cache disabled");
            None
        }
    };

    let bind = (config.bind_addr.clone(), config.port);
    let pool = web::Data::new(pool);
    let catalog = web::Data::new(Catalog::new(redis_pool));
    let config = web::Data::new(config);

    log::info!("starting HTTP server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(catalog.clone())
            .app_data(config.clone())
            .app_data(web::FormConfig::default().error_handler(|err, _| {
                AppError::Validation(err.to_string()).into()
            }))
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await
}
