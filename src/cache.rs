use std::ops::DerefMut;

use failsafe::backoff::EqualJittered;
use failsafe::failure_policy::{ConsecutiveFailures, OrElse, SuccessRateOverTimeWindow};
use failsafe::{CircuitBreaker, Config, StateMachine};
use r2d2_redis::redis::{Commands, RedisResult};

use crate::db::{DbPool, RedisPool};
use crate::error::AppError;
use crate::models::Recipe;
use crate::query;

const CATALOG_KEY: &str = "recipes:all";
// bounds how long a catalog cached just before a re-seed can be served
const CATALOG_TTL_SECONDS: usize = 300;

type CircuitBreakerType = StateMachine<
    OrElse<SuccessRateOverTimeWindow<EqualJittered>, ConsecutiveFailures<EqualJittered>>,
    (),
>;

/// Recipe catalog read through Redis, falling back to MySQL.
pub(crate) struct Catalog {
    redis: Option<RedisPool>,
    circuit_breaker: CircuitBreakerType,
}

impl Catalog {
    pub(crate) fn new(redis: Option<RedisPool>) -> Self {
        Self {
            redis,
            circuit_breaker: Config::new().build(),
        }
    }

    pub(crate) fn recipes(&self, pool: &DbPool) -> Result<Vec<Recipe>, AppError> {
        if let Some(recipes) = self.read_cache() {
            return Ok(recipes);
        }
        let recipes = self.guarded(|| {
            let conn = pool.get()?;
            Ok(query::find_all_recipes(&conn)?)
        })?;
        self.write_cache(&recipes);
        Ok(recipes)
    }

    /// Drops the cached catalog. Returns false when a cached copy may remain.
    pub(crate) fn invalidate(&self) -> bool {
        let redis_pool = match &self.redis {
            Some(pool) => pool,
            None => return true,
        };
        let result = redis_pool.get().map(|mut redis_conn| -> RedisResult<()> {
            redis_conn.deref_mut().del(CATALOG_KEY)
        });
        match result {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                log::warn!("failed to drop cached catalog: {}", e);
                false
            }
            Err(e) => {
                log::warn!("redis unavailable, cached catalog not dropped: {}", e);
                false
            }
        }
    }

    /// Runs a database call through the circuit breaker. While the breaker is
    /// open calls are rejected without touching MySQL.
    fn guarded<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> Result<T, AppError>,
    {
        match self.circuit_breaker.call(f) {
            Ok(value) => Ok(value),
            Err(failsafe::Error::Inner(e)) => Err(e),
            Err(failsafe::Error::Rejected) => {
                log::warn!("circuit breaker open, catalog read rejected");
                Err(AppError::CatalogUnavailable)
            }
        }
    }

    fn read_cache(&self) -> Option<Vec<Recipe>> {
        let mut redis_conn = match self.redis.as_ref()?.get() {
            Ok(conn) => conn,
            Err(e) => {
                log::warn!("redis unavailable, reading catalog from database: {}", e);
                return None;
            }
        };
        let value: RedisResult<Option<Vec<u8>>> = redis_conn.deref_mut().get(CATALOG_KEY);
        match value {
            Ok(Some(bytes)) if !bytes.is_empty() => match Recipe::list_from_u8(&bytes) {
                Ok(recipes) => Some(recipes),
                Err(e) => {
                    log::warn!("discarding unreadable cached catalog: {}", e);
                    None
                }
            },
            Ok(_) => None,
            Err(e) => {
                log::warn!("redis read failed: {}", e);
                None
            }
        }
    }

    fn write_cache(&self, recipes: &[Recipe]) {
        let redis_pool = match &self.redis {
            Some(pool) => pool,
            None => return,
        };
        let bytes = match Recipe::list_to_u8(recipes) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("failed to encode catalog for cache: {}", e);
                return;
            }
        };
        // data was loaded but redis went away, skip caching
        if let Ok(mut redis_conn) = redis_pool.get() {
            let result: RedisResult<()> =
                redis_conn.deref_mut().set_ex(CATALOG_KEY, bytes, CATALOG_TTL_SECONDS);
            if let Err(e) = result {
                log::warn!("failed to cache catalog: {}", e);
            }
        }
    }
}
