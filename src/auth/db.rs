use chrono::{Duration, Utc};
use diesel::prelude::*;

use crate::models::{NewSession, User};
use crate::schema::{sessions, users};

use super::crypto::{generate_token, hash_token};

pub(crate) fn create_session(
    conn: &MysqlConnection,
    user_id: i32,
    ttl_days: i64,
) -> QueryResult<String> {
    let token = generate_token();
    let token_hash = hash_token(&token);
    let expires_at = (Utc::now() + Duration::days(ttl_days)).naive_utc();

    diesel::insert_into(sessions::table)
        .values(&NewSession {
            user_id,
            token_hash: &token_hash,
            expires_at,
        })
        .execute(conn)?;

    Ok(token)
}

pub(crate) fn find_user_by_token_hash(
    conn: &MysqlConnection,
    token_hash: &str,
) -> QueryResult<Option<User>> {
    sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(token_hash))
        .filter(sessions::expires_at.gt(Utc::now().naive_utc()))
        .select(users::all_columns)
        .first::<User>(conn)
        .optional()
}

pub(crate) fn delete_session(conn: &MysqlConnection, token_hash: &str) -> QueryResult<usize> {
    diesel::delete(sessions::table.filter(sessions::token_hash.eq(token_hash))).execute(conn)
}
