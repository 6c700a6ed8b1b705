use actix_web::{web, HttpResponse};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::handlers::education::QuestionRequest;
use crate::models::activity::{NewNutritionRecord, NewRecord, NutritionKind};
use crate::scoring::nutrition;
use crate::services::content;
use crate::store::ActivityStore;
use crate::utils::session::Session;
use crate::utils::validation::{require_list, required_text, validate_payload};

#[derive(Deserialize, Validate)]
pub struct MealPlanRequest {
    #[validate(required(message = "Ingredients are required"))]
    #[validate(length(min = 1, max = 2000, message = "Ingredients must be between 1 and 2000 characters"))]
    ingredients: Option<String>,

    #[validate(length(max = 100, message = "Dietary restrictions must be at most 100 characters"))]
    dietary_restrictions: Option<String>,
}

#[derive(Serialize)]
pub struct MealPlanResponse {
    success: bool,
    plan_id: Uuid,
    meal_plan: String,
    nutrition_score: i32,
    estimated_cost: i64,
    ingredients_used: Vec<String>,
    dietary_restrictions: String,
}

#[derive(Deserialize, Validate)]
pub struct FoodWasteRequest {
    #[validate(required(message = "Expiring items are required"))]
    #[validate(length(min = 1, max = 2000, message = "Expiring items must be between 1 and 2000 characters"))]
    expiring_items: Option<String>,
}

#[derive(Serialize)]
pub struct FoodWasteResponse {
    success: bool,
    reduction_id: Uuid,
    suggestions: String,
    impact_score: i32,
    items_saved: usize,
    environmental_impact: String,
}

#[derive(Serialize)]
pub struct AdviceResponse {
    success: bool,
    record_id: Uuid,
    question: String,
    advice: String,
    disclaimer: &'static str,
}

// POST /api/generate-meal-plan
pub async fn generate_meal_plan(
    session: Session,
    store: web::Data<dyn ActivityStore>,
    config: web::Data<AppConfig>,
    payload: web::Json<MealPlanRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let user = session.user(store.get_ref()).await?;
    let raw_ingredients = required_text(&payload.ingredients, "Ingredients")?;
    let ingredients = require_list(raw_ingredients, "Ingredients")?;
    let dietary_restrictions = payload
        .dietary_restrictions
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("none")
        .to_string();

    let scoring = &config.scoring.nutrition;
    let report = nutrition::score_ingredients(&ingredients, scoring);
    let estimated_cost = nutrition::estimate_meal_cost(&ingredients, scoring);
    let meal_plan = content::meal_plan(&ingredients, &dietary_restrictions);

    let plan_id = store
        .insert(NewRecord::Nutrition(NewNutritionRecord {
            user_id: user.user_id,
            kind: NutritionKind::MealPlan,
            score: Some(report.nutrition_score),
            items: raw_ingredients.to_string(),
            payload: json!({
                "ingredients": ingredients,
                "dietary_restrictions": dietary_restrictions,
                "plan_content": meal_plan,
                "nutrition_score": report.nutrition_score,
                "estimated_cost": estimated_cost,
            }),
        }))
        .await?;

    info!("Stored meal plan {} for user {}", plan_id, user.user_id);

    Ok(HttpResponse::Ok().json(MealPlanResponse {
        success: true,
        plan_id,
        meal_plan,
        nutrition_score: report.nutrition_score,
        estimated_cost,
        ingredients_used: ingredients,
        dietary_restrictions,
    }))
}

// POST /api/reduce-food-waste
pub async fn reduce_food_waste(
    session: Session,
    store: web::Data<dyn ActivityStore>,
    config: web::Data<AppConfig>,
    payload: web::Json<FoodWasteRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let user = session.user(store.get_ref()).await?;
    let raw_items = required_text(&payload.expiring_items, "Expiring items")?;
    let items = require_list(raw_items, "Expiring items")?;

    let report = nutrition::waste_impact(items.len(), &config.scoring.waste);
    let suggestions = content::waste_suggestions(&items);

    let reduction_id = store
        .insert(NewRecord::Nutrition(NewNutritionRecord {
            user_id: user.user_id,
            kind: NutritionKind::FoodWaste,
            score: Some(report.impact_score),
            items: raw_items.to_string(),
            payload: json!({
                "expiring_items": items,
                "suggestions": suggestions,
                "impact_score": report.impact_score,
                "environmental_impact": report.environmental_impact,
            }),
        }))
        .await?;

    info!("Stored food waste reduction {} for user {}", reduction_id, user.user_id);

    Ok(HttpResponse::Ok().json(FoodWasteResponse {
        success: true,
        reduction_id,
        suggestions,
        impact_score: report.impact_score,
        items_saved: report.items_saved,
        environmental_impact: report.environmental_impact,
    }))
}

// POST /api/nutrition-advice
pub async fn nutrition_advice(
    session: Session,
    store: web::Data<dyn ActivityStore>,
    payload: web::Json<QuestionRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let user = session.user(store.get_ref()).await?;
    let question = required_text(&payload.question, "Nutrition question")?.to_string();

    let advice = content::nutrition_advice(&question);
    let record_id = store
        .insert(NewRecord::Nutrition(NewNutritionRecord {
            user_id: user.user_id,
            kind: NutritionKind::NutritionAdvice,
            score: None,
            items: String::new(),
            payload: json!({ "question": question, "advice": advice }),
        }))
        .await?;

    Ok(HttpResponse::Ok().json(AdviceResponse {
        success: true,
        record_id,
        question,
        advice,
        disclaimer: content::NUTRITION_DISCLAIMER,
    }))
}
