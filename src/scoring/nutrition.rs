use serde::{Deserialize, Serialize};

use super::clamp_score;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionConfig {
    pub base_score: i32,
    pub points_per_match: i32,
    /// Substrings marking an ingredient as healthy.
    pub healthy_keywords: Vec<String>,
    pub unhealthy_keywords: Vec<String>,
    pub cost_per_ingredient: i64,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        let words = |list: &[&str]| list.iter().map(|w| w.to_string()).collect();
        Self {
            base_score: 50,
            points_per_match: 5,
            healthy_keywords: words(&[
                "vegetable", "fruit", "whole grain", "lean protein", "legume", "bean", "lentil",
                "spinach", "kale", "broccoli", "carrot", "tomato", "oat", "fish", "egg",
            ]),
            unhealthy_keywords: words(&[
                "sugar", "candy", "soda", "chips", "fried", "bacon", "sausage", "white bread",
                "margarine", "processed", "syrup",
            ]),
            cost_per_ingredient: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WasteConfig {
    pub points_per_item: i32,
    pub co2_kg_per_item: f64,
}

impl Default for WasteConfig {
    fn default() -> Self {
        Self { points_per_item: 10, co2_kg_per_item: 0.5 }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NutritionReport {
    pub nutrition_score: i32,
    pub healthy_matches: usize,
    pub unhealthy_matches: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WasteReport {
    pub impact_score: i32,
    pub items_saved: usize,
    pub environmental_impact: String,
}

fn count_matching(ingredients: &[String], keywords: &[String]) -> usize {
    ingredients
        .iter()
        .map(|i| i.to_lowercase())
        .filter(|i| keywords.iter().any(|k| i.contains(k.as_str())))
        .count()
}

pub fn score_ingredients(ingredients: &[String], config: &NutritionConfig) -> NutritionReport {
    let healthy = count_matching(ingredients, &config.healthy_keywords);
    let unhealthy = count_matching(ingredients, &config.unhealthy_keywords);
    let raw = config.base_score as f64 + config.points_per_match as f64 * (healthy as f64 - unhealthy as f64);

    NutritionReport {
        nutrition_score: clamp_score(raw),
        healthy_matches: healthy,
        unhealthy_matches: unhealthy,
    }
}

pub fn estimate_meal_cost(ingredients: &[String], config: &NutritionConfig) -> i64 {
    ingredients.len() as i64 * config.cost_per_ingredient
}

pub fn waste_impact(item_count: usize, config: &WasteConfig) -> WasteReport {
    let co2 = item_count as f64 * config.co2_kg_per_item;
    WasteReport {
        impact_score: clamp_score(item_count as f64 * config.points_per_item as f64),
        items_saved: item_count,
        environmental_impact: format!(
            "Saved {} items from landfill, reducing ~{:.1} kg CO₂",
            item_count, co2
        ),
    }
}
