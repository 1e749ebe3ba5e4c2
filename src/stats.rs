use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Food;
use crate::suggest::URGENT_WINDOW_DAYS;

/// Keyword groups, checked in order; an item lands in the first group with a
/// keyword contained in its lower-cased name.
const NUTRITION_GROUPS: [(&str, &[&str]); 5] = [
    (
        "Đạm",
        &["thịt", "cá", "tôm", "trứng", "giò", "chả", "sườn", "bò", "gà"],
    ),
    (
        "Chất xơ",
        &["rau", "cải", "muống", "ngót", "bí", "bầu", "mướp", "súp lơ"],
    ),
    (
        "Vitamin",
        &["quả", "trái", "cam", "táo", "chuối", "bơ", "nho", "xoài"],
    ),
    ("Sữa/Bơ", &["sữa", "phô mai", "yogurt", "váng sữa"]),
    ("Tinh bột", &["bánh", "mỳ", "miến", "bún", "ngô", "khoai"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ExpiryStatus {
    Expired,
    Soon,
    Fresh,
}

impl ExpiryStatus {
    pub(crate) fn from_days_left(days: i64) -> Self {
        if days < 0 {
            ExpiryStatus::Expired
        } else if days <= URGENT_WINDOW_DAYS {
            ExpiryStatus::Soon
        } else {
            ExpiryStatus::Fresh
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct NutritionCount {
    pub group: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Statistics {
    pub today: NaiveDate,
    pub locations: BTreeMap<String, usize>,
    pub expired: Vec<Food>,
    pub soon: Vec<Food>,
    pub fresh: Vec<Food>,
    pub nutrition: Vec<NutritionCount>,
    pub health_score: u32,
    pub advice: Vec<String>,
}

pub(crate) fn nutrition_group(name: &str) -> Option<&'static str> {
    let name = name.to_lowercase();
    NUTRITION_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
        .map(|(group, _)| *group)
}

pub(crate) fn health_score(expired: usize, soon: usize) -> u32 {
    let penalty = 10 * expired as i64 + 5 * soon as i64;
    (100 - penalty).max(0) as u32
}

pub(crate) fn summarize(foods: Vec<Food>, today: NaiveDate) -> Statistics {
    let mut locations = BTreeMap::new();
    let mut counts = [0usize; NUTRITION_GROUPS.len()];
    for food in &foods {
        *locations.entry(food.storage_location.clone()).or_insert(0) += 1;
        if let Some(group) = nutrition_group(&food.name) {
            if let Some(i) = NUTRITION_GROUPS.iter().position(|(g, _)| *g == group) {
                counts[i] += 1;
            }
        }
    }

    let (mut expired, mut soon, mut fresh) = (Vec::new(), Vec::new(), Vec::new());
    for food in foods {
        match ExpiryStatus::from_days_left(food.days_left(today)) {
            ExpiryStatus::Expired => expired.push(food),
            ExpiryStatus::Soon => soon.push(food),
            ExpiryStatus::Fresh => fresh.push(food),
        }
    }

    let nutrition: Vec<NutritionCount> = NUTRITION_GROUPS
        .iter()
        .zip(counts)
        .map(|((group, _), count)| NutritionCount {
            group: *group,
            count,
        })
        .collect();
    let health_score = health_score(expired.len(), soon.len());
    let advice = advice(health_score, &expired, &soon, &nutrition);

    Statistics {
        today,
        locations,
        expired,
        soon,
        fresh,
        nutrition,
        health_score,
        advice,
    }
}

fn advice(
    health_score: u32,
    expired: &[Food],
    soon: &[Food],
    nutrition: &[NutritionCount],
) -> Vec<String> {
    let mut advice = Vec::new();
    advice.push(
        match health_score {
            80.. => "Your fridge is in great shape, keep it up!",
            50..=79 => "Old items are piling up, time to check the fridge.",
            _ => "Alert! The fridge is unbalanced and a lot has gone off.",
        }
        .to_string(),
    );

    if !expired.is_empty() {
        advice.push(format!(
            "{} item(s) are past their date. Throw them out.",
            expired.len()
        ));
    }
    if let Some(first) = soon.first() {
        advice.push(format!("Cook '{}' soon, it is about to expire.", first.name));
    }

    let missing: Vec<&str> = nutrition
        .iter()
        .filter(|n| n.count == 0)
        .map(|n| n.group)
        .collect();
    if !missing.is_empty() {
        advice.push(format!("Next shopping trip, add: {}.", missing.join(", ")));
    }
    advice
}
