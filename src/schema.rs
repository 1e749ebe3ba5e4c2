table! {
    favorites (user_id, recipe_id) {
        user_id -> Integer,
        recipe_id -> Integer,
    }
}

table! {
    foods (id) {
        id -> Integer,
        name -> Varchar,
        quantity -> Double,
        unit -> Varchar,
        storage_location -> Varchar,
        expiration_date -> Date,
        added_at -> Timestamp,
        user_id -> Integer,
    }
}

table! {
    recipes (id) {
        id -> Integer,
        name -> Varchar,
        ingredients_list -> Text,
        instructions -> Text,
        image_url -> Nullable<Varchar>,
    }
}

table! {
    sessions (id) {
        id -> Integer,
        user_id -> Integer,
        token_hash -> Varchar,
        expires_at -> Timestamp,
        created_at -> Timestamp,
    }
}

table! {
    users (id) {
        id -> Integer,
        username -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        created_at -> Timestamp,
    }
}

joinable!(favorites -> recipes (recipe_id));
joinable!(favorites -> users (user_id));
joinable!(foods -> users (user_id));
joinable!(sessions -> users (user_id));

allow_tables_to_appear_in_same_query!(favorites, foods, recipes, sessions, users,);
