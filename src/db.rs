use std::time::Duration;

use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use r2d2_redis::RedisConnectionManager;

pub(crate) type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;
pub(crate) type RedisPool = r2d2::Pool<RedisConnectionManager>;

const CACHE_POOL_MAX_OPEN: u32 = 16;
const CACHE_POOL_MIN_IDLE: u32 = 8;
const CACHE_POOL_EXPIRE_SECONDS: u64 = 60;

pub(crate) fn create_pool(database_url: &str) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<MysqlConnection>::new(database_url);
    r2d2::Pool::builder().build(manager)
}

/// Redis is optional: the pool is built lazily so a cache outage at start-up
/// only means catalog reads go straight to MySQL.
pub(crate) fn create_redis_pool(
    redis_url: &str,
) -> Result<RedisPool, r2d2_redis::redis::RedisError> {
    let manager = RedisConnectionManager::new(redis_url)?;
    Ok(r2d2::Pool::builder()
        .max_size(CACHE_POOL_MAX_OPEN)
        .max_lifetime(Some(Duration::from_secs(CACHE_POOL_EXPIRE_SECONDS)))
        .min_idle(Some(CACHE_POOL_MIN_IDLE))
        .connection_timeout(Duration::from_secs(2))
        .build_unchecked(manager))
}
