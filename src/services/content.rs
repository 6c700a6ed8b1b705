//! Offline, templated content for the generation endpoints.

use crate::models::activity::Level;

pub const HEALTH_DISCLAIMER: &str = "Always consult healthcare professionals for medical advice";
pub const NUTRITION_DISCLAIMER: &str =
    "Consult registered dietitians for personalized nutrition advice";

/// How many ingredients get a dedicated meal suggestion.
const SUGGESTED_INGREDIENTS: usize = 3;

pub fn learning_path(topic: &str, level: Level) -> String {
    let steps: &[&str] = match level {
        Level::Beginner => &["Core vocabulary and basics", "Guided exercises", "A small first project"],
        Level::Intermediate => &["Review of fundamentals", "Deeper concepts and patterns", "A medium-sized project"],
        Level::Advanced => &["Edge cases and internals", "Reading primary sources", "Teaching or publishing your work"],
    };

    let mut path = format!("Learning Path for {} ({}):\n", topic, level);
    for (i, step) in steps.iter().enumerate() {
        path.push_str(&format!("{}. {}\n", i + 1, step));
    }
    path.push_str(&format!("{}. Projects and review milestones", steps.len() + 1));
    path
}

pub fn answer(question: &str) -> String {
    format!(
        "Here is an overview of \"{}\": start from trusted references, summarise the key ideas in your own words and test yourself on them.",
        question
    )
}

pub fn health_answer(question: &str) -> String {
    format!(
        "Health information about {}: general guidance only.\n\nIMPORTANT: This information is for educational purposes only and should not replace professional medical advice. Always consult with a healthcare provider for medical concerns.",
        question
    )
}

pub fn nutrition_advice(question: &str) -> String {
    format!(
        "Nutrition advice about {}: Focus on balanced meals with proteins, vegetables, and whole grains. Stay hydrated!\n\nNote: This nutritional information is for educational purposes. For personalized nutrition advice, consult with a registered dietitian.",
        question
    )
}

pub fn meal_plan(ingredients: &[String], dietary_restrictions: &str) -> String {
    let mut plan = String::from("Meal Suggestions:\n");
    for ingredient in ingredients.iter().take(SUGGESTED_INGREDIENTS) {
        plan.push_str(&format!("• Build a dish around {}\n", ingredient));
    }
    if dietary_restrictions != "none" {
        plan.push_str(&format!("\nAdjusted for: {}\n", dietary_restrictions));
    }
    plan.push_str("\nNutrition Tips: Balance your meals with proteins, carbs, and vegetables. Stay hydrated!");
    plan
}

pub fn waste_suggestions(items: &[String]) -> String {
    format!(
        "Food waste reduction ideas for {}:\n1. Make smoothies\n2. Create soups\n3. Freeze leftovers\n4. Compost scraps",
        items.join(", ")
    )
}
