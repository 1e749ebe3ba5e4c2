use actix_web::{get, post, web, HttpResponse};
use chrono::NaiveDateTime;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::Serialize;

use crate::auth::{create_session, delete_session, hash_password, verify_password, AuthUser};
use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppError;
use crate::forms::{LoginForm, PasswordForm, RegisterForm};
use crate::models::NewUser;
use crate::query;

const DUPLICATE_ACCOUNT: &str = "Username or email already exists";

#[derive(Debug, Serialize)]
struct RegisterResponse {
    user_id: i32,
    token: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Serialize)]
struct AccountResponse {
    id: i32,
    username: String,
    email: String,
    created_at: NaiveDateTime,
}

fn duplicate_as_conflict(e: DieselError) -> AppError {
    match e {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            AppError::Conflict(DUPLICATE_ACCOUNT.to_string())
        }
        e => AppError::from(e),
    }
}

#[post("/register")]
async fn register(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    form.validate()?;
    let ttl_days = config.session_ttl_days;

    let (user_id, token) = web::block(move || -> Result<_, AppError> {
        let conn = pool.get()?;
        let username = form.username.trim();
        let email = form.email.trim();
        if query::username_or_email_taken(&conn, username, email)? {
            return Err(AppError::Conflict(DUPLICATE_ACCOUNT.to_string()));
        }

        let password_hash = hash_password(&form.password)?;
        let new_user = NewUser {
            username,
            email,
            password_hash: &password_hash,
        };
        // a concurrent registration can still win the race to the unique index
        let user = query::insert_user(&conn, &new_user).map_err(duplicate_as_conflict)?;
        let token = create_session(&conn, user.id, ttl_days)?;
        Ok((user.id, token))
    })
    .await??;

    log::info!("registered user {}", user_id);
    Ok(HttpResponse::Created().json(RegisterResponse { user_id, token }))
}

#[post("/login")]
async fn login(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let ttl_days = config.session_ttl_days;

    let token = web::block(move || -> Result<_, AppError> {
        let conn = pool.get()?;
        let user = query::find_user_by_username(&conn, form.username.trim())?
            .filter(|user| verify_password(&form.password, &user.password_hash))
            .ok_or(AppError::InvalidCredentials)?;
        Ok(create_session(&conn, user.id, ttl_days)?)
    })
    .await??;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

#[post("/logout")]
async fn logout(auth: AuthUser, pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    web::block(move || -> Result<_, AppError> {
        let conn = pool.get()?;
        Ok(delete_session(&conn, &auth.token_hash)?)
    })
    .await??;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/account")]
async fn account(auth: AuthUser) -> HttpResponse {
    let user = auth.user;
    HttpResponse::Ok().json(AccountResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: user.created_at,
    })
}

#[post("/account/password")]
async fn change_password(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    form: web::Form<PasswordForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    if form.new_password.is_empty() {
        return Err(AppError::Validation("New password is required".to_string()));
    }

    web::block(move || -> Result<_, AppError> {
        if !verify_password(&form.old_password, &auth.user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }
        let password_hash = hash_password(&form.new_password)?;
        let conn = pool.get()?;
        query::update_password_hash(&conn, auth.user.id, &password_hash)?;
        Ok(())
    })
    .await??;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, ResponseError};

    #[test]
    fn unique_violation_is_a_conflict() {
        let err = duplicate_as_conflict(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("Duplicate entry 'lan' for key 'username'".to_string()),
        ));
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Username or email already exists");
    }

    #[test]
    fn other_insert_failures_stay_internal() {
        let err = duplicate_as_conflict(DieselError::RollbackTransaction);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = duplicate_as_conflict(DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("fk".to_string()),
        ));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
