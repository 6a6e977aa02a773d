use actix_web::{post, web, HttpResponse};
use chrono::Utc;
use fitplan_db::{plan::PlanRepository, subscription::SubscriptionRepository};
use fitplan_model::{
    biometrics::Goal,
    generated::{Recipe, RecipeRequest, Workout, WorkoutRequest},
};
use log::{error, info};
use serde::Serialize;

use crate::{
    error::ApiError,
    llm::{extract_json_or, TextGenerator},
    prompts,
};

#[derive(Serialize)]
struct RecipeResponse {
    recipe: Recipe,
}

#[derive(Serialize)]
struct WorkoutResponse {
    workout: Workout,
}

async fn require_pro(
    subscriptions: &dyn SubscriptionRepository,
    user_id: &str,
) -> Result<(), ApiError> {
    let subscription = subscriptions.fetch_subscription(user_id).await?;
    if subscription.map_or(false, |s| s.is_pro(Utc::now())) {
        Ok(())
    } else {
        info!("Rejecting pro request from {}", user_id);
        Err(ApiError::ProRequired)
    }
}

async fn generate(generator: &dyn TextGenerator, prompt: &str) -> Result<String, ApiError> {
    generator.generate(prompt).await.map_err(|e| {
        error!("Text generation failed: {}", e);
        ApiError::Upstream(e.to_string())
    })
}

#[post("/ai/recipe")]
pub async fn generate_recipe(
    subscriptions: web::Data<dyn SubscriptionRepository>,
    plans: web::Data<dyn PlanRepository>,
    generator: web::Data<dyn TextGenerator>,
    request: web::Json<RecipeRequest>,
) -> Result<HttpResponse, ApiError> {
    require_pro(subscriptions.get_ref(), &request.user_id).await?;

    let profile = plans
        .fetch_plan(&request.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no plan for {}", request.user_id)))?;

    let prompt = prompts::recipe_prompt(
        profile.active_plan(),
        profile.goal,
        request.meal.as_deref(),
        request.preferences.as_deref(),
    );
    let text = generate(generator.get_ref(), &prompt).await?;
    let recipe = extract_json_or(&text, Recipe::unavailable());
    Ok(HttpResponse::Ok().json(RecipeResponse { recipe }))
}

#[post("/ai/workout")]
pub async fn generate_workout(
    subscriptions: web::Data<dyn SubscriptionRepository>,
    plans: web::Data<dyn PlanRepository>,
    generator: web::Data<dyn TextGenerator>,
    request: web::Json<WorkoutRequest>,
) -> Result<HttpResponse, ApiError> {
    require_pro(subscriptions.get_ref(), &request.user_id).await?;

    let goal = plans
        .fetch_plan(&request.user_id)
        .await?
        .map_or(Goal::default(), |profile| profile.goal);

    let prompt = prompts::workout_prompt(goal, request.focus.as_deref(), request.minutes);
    let text = generate(generator.get_ref(), &prompt).await?;
    let workout = extract_json_or(&text, Workout::unavailable());
    Ok(HttpResponse::Ok().json(WorkoutResponse { workout }))
}
