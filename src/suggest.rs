use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Food, Recipe};

/// Items expiring within this many days (inclusive) count as urgent.
pub(crate) const URGENT_WINDOW_DAYS: i64 = 3;
/// Bonus added per matched ingredient that is also urgent.
pub(crate) const URGENCY_BONUS: u32 = 10;
/// Non-favorite recipes must score strictly above this to be suggested.
pub(crate) const SCORE_THRESHOLD: u32 = 50;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Suggestion {
    pub recipe: Recipe,
    pub score: u32,
    pub base_score: u32,
    pub is_urgent: bool,
    pub is_favorite: bool,
    pub matches: Vec<String>,
    pub missing: Vec<String>,
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Loose containment in either direction, so "trứng" matches "trứng gà".
fn matches_any(token: &str, names: &[String]) -> bool {
    names
        .iter()
        .any(|name| name.contains(token) || token.contains(name.as_str()))
}

/// Splits a comma-separated ingredient list into normalized tokens.
///
/// Blank text yields no tokens. Blank entries inside a non-blank list are
/// kept as empty tokens, which match any inventory item.
pub(crate) fn ingredient_tokens(list: &str) -> Vec<String> {
    if list.trim().is_empty() {
        return Vec::new();
    }
    list.split(',').map(normalize).collect()
}

fn base_score(matched: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * matched as f64 / total as f64).round() as u32
}

/// Scores every recipe against the inventory; favorites lead regardless of score.
pub(crate) fn suggest(
    foods: &[Food],
    recipes: &[Recipe],
    favorites: &HashSet<i32>,
    today: NaiveDate,
) -> Vec<Suggestion> {
    let fridge: Vec<String> = foods.iter().map(|f| normalize(&f.name)).collect();
    let urgent: Vec<String> = foods
        .iter()
        .filter(|f| (0..=URGENT_WINDOW_DAYS).contains(&f.days_left(today)))
        .map(|f| normalize(&f.name))
        .collect();

    let mut suggestions: Vec<Suggestion> = recipes
        .iter()
        .filter_map(|recipe| {
            let tokens = ingredient_tokens(&recipe.ingredients_list);

            let mut matches = Vec::new();
            let mut bonus = 0;
            for token in &tokens {
                if matches_any(token, &fridge) {
                    if matches_any(token, &urgent) {
                        bonus += URGENCY_BONUS;
                    }
                    matches.push(token.clone());
                }
            }

            let base = base_score(matches.len(), tokens.len());
            let score = base + bonus;
            let is_favorite = favorites.contains(&recipe.id);
            if !is_favorite && score <= SCORE_THRESHOLD {
                return None;
            }

            let mut missing: Vec<String> = Vec::new();
            for token in tokens {
                if !matches.contains(&token) && !missing.contains(&token) {
                    missing.push(token);
                }
            }

            Some(Suggestion {
                recipe: recipe.clone(),
                score,
                base_score: base,
                is_urgent: bonus > 0,
                is_favorite,
                matches,
                missing,
            })
        })
        .collect();

    // stable: equal keys keep catalog order
    suggestions.sort_by(|a, b| (b.is_favorite, b.score).cmp(&(a.is_favorite, a.score)));
    suggestions
}

/// Whole catalog with favorites moved to the front, otherwise in catalog order.
pub(crate) fn favorites_first(mut recipes: Vec<Recipe>, favorites: &HashSet<i32>) -> Vec<Recipe> {
    recipes.sort_by_key(|r| !favorites.contains(&r.id));
    recipes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 1).unwrap() + chrono::Duration::days(n as i64)
    }

    fn food(name: &str, expires: NaiveDate) -> Food {
        Food {
            id: 0,
            name: name.to_string(),
            quantity: 1.0,
            unit: "cái".to_string(),
            storage_location: "Ngăn mát".to_string(),
            expiration_date: expires,
            added_at: day(0).and_hms_opt(8, 0, 0).unwrap(),
            user_id: 1,
        }
    }

    fn recipe(id: i32, name: &str, ingredients: &str) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            ingredients_list: ingredients.to_string(),
            instructions: String::new(),
            image_url: None,
        }
    }

    fn favs(ids: &[i32]) -> HashSet<i32> {
        ids.iter().copied().collect()
    }

    #[test]
    fn urgent_matches_add_bonus() {
        let foods = vec![food("Trứng gà", day(2)), food("Hành lá", day(2))];
        let recipes = vec![recipe(1, "Trứng chiên hành lá", "Trứng gà, Hành lá, Nước mắm")];

        let result = suggest(&foods, &recipes, &favs(&[]), day(0));

        assert_eq!(result.len(), 1);
        let s = &result[0];
        assert_eq!(s.base_score, 67);
        assert_eq!(s.score, 87);
        assert!(s.is_urgent);
        assert_eq!(s.matches, vec!["trứng gà", "hành lá"]);
        assert_eq!(s.missing, vec!["nước mắm"]);
    }

    #[test]
    fn fresh_items_score_without_bonus() {
        let foods = vec![food("Trứng gà", day(10)), food("Hành lá", day(10))];
        let recipes = vec![recipe(1, "Trứng chiên hành lá", "Trứng gà, Hành lá, Nước mắm")];

        let result = suggest(&foods, &recipes, &favs(&[]), day(0));

        assert_eq!(result[0].score, 67);
        assert!(!result[0].is_urgent);
    }

    #[test]
    fn expired_items_match_but_are_not_urgent() {
        let foods = vec![food("Cà chua", day(0)), food("Đậu phụ", day(0))];
        let recipes = vec![recipe(1, "Đậu phụ sốt cà chua", "Đậu phụ, Cà chua, Hành lá")];

        let result = suggest(&foods, &recipes, &favs(&[]), day(1));

        assert_eq!(result[0].score, 67);
        assert!(!result[0].is_urgent);
    }

    #[test]
    fn substring_match_works_both_ways() {
        let foods = vec![food("trứng", day(20))];
        let recipes = vec![
            recipe(1, "a", "Trứng gà"),
            recipe(2, "b", "Trứng"),
        ];
        let foods_long = vec![food("Trứng gà ta", day(20))];

        assert_eq!(suggest(&foods, &recipes, &favs(&[]), day(0)).len(), 2);
        assert_eq!(suggest(&foods_long, &recipes, &favs(&[]), day(0)).len(), 2);
    }

    #[test]
    fn exact_name_counts_as_match() {
        let foods = vec![food("  Xà lách ", day(20))];
        let recipes = vec![recipe(1, "Xà lách", "xà lách")];

        let result = suggest(&foods, &recipes, &favs(&[]), day(0));

        assert_eq!(result[0].base_score, 100);
        assert!(result[0].missing.is_empty());
    }

    #[test]
    fn empty_ingredient_list_scores_zero() {
        let foods = vec![food("Trứng gà", day(1))];
        let recipes = vec![recipe(1, "Nothing", ""), recipe(2, "Blank", "   ")];

        let result = suggest(&foods, &recipes, &favs(&[1, 2]), day(0));

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|s| s.score == 0 && s.matches.is_empty()));
        assert!(result.iter().all(|s| s.missing.is_empty()));
    }

    #[test]
    fn blank_token_matches_any_item() {
        let foods = vec![food("Bơ", day(20))];
        let recipes = vec![recipe(1, "Odd", "Cá, ,Tôm")];

        let result = suggest(&foods, &recipes, &favs(&[1]), day(0));

        assert_eq!(result[0].matches, vec![""]);
        assert_eq!(result[0].base_score, 33);
    }

    #[test]
    fn threshold_is_strict() {
        let foods = vec![food("Cá", day(20))];
        let recipes = vec![recipe(1, "Half", "Cá, Gừng")];

        assert!(suggest(&foods, &recipes, &favs(&[]), day(0)).is_empty());
    }

    #[test]
    fn favorites_always_appear_first() {
        let foods = vec![food("Rau muống", day(20)), food("Tỏi", day(20))];
        let recipes = vec![
            recipe(1, "Rau muống xào tỏi", "Rau muống, Tỏi"),
            recipe(2, "Thịt kho tàu", "Thịt lợn, Trứng gà, Nước dừa"),
        ];

        let result = suggest(&foods, &recipes, &favs(&[2]), day(0));

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].recipe.id, 2);
        assert_eq!(result[0].score, 0);
        assert!(result[0].is_favorite);
        assert_eq!(result[1].recipe.id, 1);
        assert_eq!(result[1].score, 100);
    }

    #[test]
    fn equal_scores_keep_catalog_order() {
        let foods = vec![food("Cà chua", day(20))];
        let recipes = vec![
            recipe(5, "first", "Cà chua"),
            recipe(3, "second", "Cà chua"),
            recipe(9, "third", "Cà chua, Dưa chuột"),
        ];

        let result = suggest(&foods, &recipes, &favs(&[5, 3, 9]), day(0));
        let ids: Vec<i32> = result.iter().map(|s| s.recipe.id).collect();

        assert_eq!(ids, vec![5, 3, 9]);
    }

    #[test]
    fn bonus_can_push_past_one_hundred() {
        let foods = vec![food("Cà chua", day(1)), food("Dưa chuột", day(3)), food("Xà lách", day(0))];
        let recipes = vec![recipe(1, "Salad", "Cà chua, Dưa chuột, Xà lách")];

        let result = suggest(&foods, &recipes, &favs(&[]), day(0));

        assert_eq!(result[0].score, 130);
    }

    #[test]
    fn empty_inputs_give_empty_results() {
        let recipes = vec![recipe(1, "a", "Cá")];
        assert!(suggest(&[], &recipes, &favs(&[]), day(0)).is_empty());
        assert!(suggest(&[food("Cá", day(1))], &[], &favs(&[]), day(0)).is_empty());
    }

    #[test]
    fn catalog_lists_favorites_first() {
        let recipes = vec![recipe(1, "a", ""), recipe(2, "b", ""), recipe(3, "c", "")];
        let ids: Vec<i32> = favorites_first(recipes, &favs(&[3]))
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
