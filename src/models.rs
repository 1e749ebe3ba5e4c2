use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::schema::{favorites, foods, recipes, sessions, users};

pub(crate) const DEFAULT_LOCATION: &str = "Ngăn mát";

#[derive(Debug, Clone, Queryable)]
pub(crate) struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "users"]
pub(crate) struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

#[derive(Insertable)]
#[table_name = "sessions"]
pub(crate) struct NewSession<'a> {
    pub user_id: i32,
    pub token_hash: &'a str,
    pub expires_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Queryable)]
pub(crate) struct Food {
    pub id: i32,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub storage_location: String,
    pub expiration_date: NaiveDate,
    pub added_at: NaiveDateTime,
    pub user_id: i32,
}

impl Food {
    /// Whole days from `today` until the item expires; negative once expired.
    pub(crate) fn days_left(&self, today: NaiveDate) -> i64 {
        (self.expiration_date - today).num_days()
    }

    pub(crate) fn ensure_owned_by(&self, user_id: i32) -> Result<(), AppError> {
        if self.user_id == user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[derive(Insertable)]
#[table_name = "foods"]
pub(crate) struct NewFood<'a> {
    pub name: &'a str,
    pub quantity: f64,
    pub unit: &'a str,
    pub storage_location: &'a str,
    pub expiration_date: NaiveDate,
    pub user_id: i32,
}

/// Validated food fields shared by create and edit.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[table_name = "foods"]
pub(crate) struct FoodChanges {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub storage_location: String,
    pub expiration_date: NaiveDate,
}

impl FoodChanges {
    pub(crate) fn for_user(&self, user_id: i32) -> NewFood<'_> {
        NewFood {
            name: &self.name,
            quantity: self.quantity,
            unit: &self.unit,
            storage_location: &self.storage_location,
            expiration_date: self.expiration_date,
            user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable)]
pub(crate) struct Recipe {
    pub id: i32,
    pub name: String,
    pub ingredients_list: String,
    pub instructions: String,
    pub image_url: Option<String>,
}

impl Recipe {
    pub(crate) fn list_from_u8(bytes: &[u8]) -> Result<Vec<Self>, bincode::Error> {
        bincode::deserialize(bytes)
    }

    pub(crate) fn list_to_u8(recipes: &[Self]) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(recipes)
    }
}

#[derive(Insertable)]
#[table_name = "recipes"]
pub(crate) struct NewRecipe<'a> {
    pub name: &'a str,
    pub ingredients_list: &'a str,
    pub instructions: &'a str,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[table_name = "favorites"]
pub(crate) struct Favorite {
    pub user_id: i32,
    pub recipe_id: i32,
}
