use std::{env, fmt::Display, ops::RangeInclusive, str::FromStr};

use log::{info, warn};

pub(crate) struct Config {
    pub database_url: String,
    pub redis_url: Option<String>,
    pub bind_addr: String,
    pub port: u16,
    pub session_ttl_days: i64,
}

impl Config {
    pub(crate) fn load() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.is_empty()),
            bind_addr: try_load("BIND_ADDR", "127.0.0.1"),
            port: try_load("PORT", "8080"),
            session_ttl_days: session_ttl_days(try_load("SESSION_TTL_DAYS", "30"))
                .expect("Environment misconfigured!"),
        }
    }
}

const SESSION_TTL_RANGE: RangeInclusive<i64> = 1..=3650;

fn session_ttl_days(days: i64) -> Result<i64, ()> {
    if SESSION_TTL_RANGE.contains(&days) {
        Ok(days)
    } else {
        warn!(
            "Invalid SESSION_TTL_DAYS value: {days}, expected {}..={}",
            SESSION_TTL_RANGE.start(),
            SESSION_TTL_RANGE.end()
        );
        Err(())
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ttl_must_be_sane() {
        assert_eq!(session_ttl_days(30), Ok(30));
        assert_eq!(session_ttl_days(1), Ok(1));
        assert_eq!(session_ttl_days(3650), Ok(3650));
        assert!(session_ttl_days(0).is_err());
        assert!(session_ttl_days(-5).is_err());
        assert!(session_ttl_days(i64::MAX).is_err());
    }
}
