mod crypto;
mod db;
mod extractor;

pub(crate) use crypto::{hash_password, verify_password};
pub(crate) use db::{create_session, delete_session};
pub(crate) use extractor::AuthUser;
