use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::{ready, FutureExt, LocalBoxFuture};

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::User;

use super::crypto::hash_token;
use super::db::find_user_by_token_hash;

/// The caller behind a valid `Authorization: Bearer <token>` header.
///
/// Handlers that take this argument reject unauthenticated requests with 401
/// before any of their own code runs.
pub(crate) struct AuthUser {
    pub user: User,
    pub token_hash: String,
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token_hash = match bearer_token(req) {
            Some(token) => hash_token(token),
            None => return ready(Err(AppError::Unauthorized)).boxed_local(),
        };
        let pool = match req.app_data::<web::Data<DbPool>>() {
            Some(pool) => pool.clone(),
            None => {
                log::error!("database pool missing from app data");
                return ready(Err(AppError::Unauthorized)).boxed_local();
            }
        };

        async move {
            let lookup = token_hash.clone();
            let user = web::block(move || {
                let conn = pool.get()?;
                find_user_by_token_hash(&conn, &lookup).map_err(AppError::from)
            })
            .await??
            .ok_or(AppError::Unauthorized)?;
            Ok(AuthUser { user, token_hash })
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn reads_bearer_token() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc123"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc123"));
    }

    #[test]
    fn rejects_other_schemes() {
        let basic = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic abc123"))
            .to_http_request();
        let empty = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer "))
            .to_http_request();
        assert_eq!(bearer_token(&basic), None);
        assert_eq!(bearer_token(&empty), None);
        assert_eq!(bearer_token(&TestRequest::default().to_http_request()), None);
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let result = AuthUser::extract(&req).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
