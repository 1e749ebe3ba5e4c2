use std::collections::HashSet;

use diesel::prelude::*;

use crate::models::{Favorite, Food, FoodChanges, NewRecipe, NewUser, Recipe, User};
use crate::schema::{favorites, foods, recipes, users};

no_arg_sql_function!(
    last_insert_id,
    diesel::sql_types::Unsigned<diesel::sql_types::BigInt>,
    "Id generated by the last insert on this connection."
);

fn inserted_id(raw: u64) -> QueryResult<i32> {
    i32::try_from(raw).map_err(|e| diesel::result::Error::DeserializationError(Box::new(e)))
}

pub(crate) fn find_user_by_username(
    conn: &MysqlConnection,
    username: &str,
) -> QueryResult<Option<User>> {
    users::table
        .filter(users::username.eq(username))
        .first(conn)
        .optional()
}

pub(crate) fn username_or_email_taken(
    conn: &MysqlConnection,
    username: &str,
    email: &str,
) -> QueryResult<bool> {
    use diesel::dsl::exists;

    diesel::select(exists(
        users::table.filter(users::username.eq(username).or(users::email.eq(email))),
    ))
    .get_result(conn)
}

/// Inserts the user and returns the new row. MySQL has no RETURNING, so the
/// row is read back by its unique username inside the same transaction.
pub(crate) fn insert_user(conn: &MysqlConnection, new_user: &NewUser) -> QueryResult<User> {
    conn.transaction(|| {
        diesel::insert_into(users::table)
            .values(new_user)
            .execute(conn)?;
        users::table
            .filter(users::username.eq(new_user.username))
            .first(conn)
    })
}

pub(crate) fn update_password_hash(
    conn: &MysqlConnection,
    user_id: i32,
    password_hash: &str,
) -> QueryResult<usize> {
    diesel::update(users::table.find(user_id))
        .set(users::password_hash.eq(password_hash))
        .execute(conn)
}

pub(crate) fn find_foods_for_user(conn: &MysqlConnection, owner: i32) -> QueryResult<Vec<Food>> {
    foods::table
        .filter(foods::user_id.eq(owner))
        .order((foods::expiration_date.asc(), foods::id.asc()))
        .load(conn)
}

pub(crate) fn find_food(conn: &MysqlConnection, food_id: i32) -> QueryResult<Option<Food>> {
    foods::table.find(food_id).first(conn).optional()
}

pub(crate) fn insert_food(
    conn: &MysqlConnection,
    owner: i32,
    changes: &FoodChanges,
) -> QueryResult<Food> {
    conn.transaction(|| {
        diesel::insert_into(foods::table)
            .values(&changes.for_user(owner))
            .execute(conn)?;
        let food_id = inserted_id(diesel::select(last_insert_id).get_result(conn)?)?;
        foods::table.find(food_id).first(conn)
    })
}

pub(crate) fn update_food(
    conn: &MysqlConnection,
    food_id: i32,
    changes: &FoodChanges,
) -> QueryResult<Food> {
    diesel::update(foods::table.find(food_id))
        .set(changes)
        .execute(conn)?;
    foods::table.find(food_id).first(conn)
}

pub(crate) fn delete_food(conn: &MysqlConnection, food_id: i32) -> QueryResult<usize> {
    diesel::delete(foods::table.find(food_id)).execute(conn)
}

pub(crate) fn find_all_recipes(conn: &MysqlConnection) -> QueryResult<Vec<Recipe>> {
    recipes::table.order(recipes::id.asc()).load(conn)
}

pub(crate) fn recipe_exists(conn: &MysqlConnection, recipe_id: i32) -> QueryResult<bool> {
    use diesel::dsl::exists;

    diesel::select(exists(recipes::table.find(recipe_id))).get_result(conn)
}

/// Replaces the whole catalog. Favorites point at recipe ids, so they go too.
pub(crate) fn replace_recipes(conn: &MysqlConnection, seed: &[NewRecipe]) -> QueryResult<usize> {
    conn.transaction(|| {
        diesel::delete(favorites::table).execute(conn)?;
        diesel::delete(recipes::table).execute(conn)?;
        diesel::insert_into(recipes::table)
            .values(seed)
            .execute(conn)
    })
}

pub(crate) fn find_favorite_ids(conn: &MysqlConnection, owner: i32) -> QueryResult<HashSet<i32>> {
    let ids = favorites::table
        .filter(favorites::user_id.eq(owner))
        .select(favorites::recipe_id)
        .load::<i32>(conn)?;
    Ok(ids.into_iter().collect())
}

/// Flips the (user, recipe) favorite pair. Returns true when it now exists.
pub(crate) fn toggle_favorite(conn: &MysqlConnection, favorite: Favorite) -> QueryResult<bool> {
    conn.transaction(|| {
        let removed = diesel::delete(favorites::table.find((favorite.user_id, favorite.recipe_id)))
            .execute(conn)?;
        if removed > 0 {
            return Ok(false);
        }
        diesel::insert_into(favorites::table)
            .values(&favorite)
            .execute(conn)?;
        Ok(true)
    })
}
