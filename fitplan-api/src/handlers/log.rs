use actix_web::{delete, get, post, web, HttpResponse};
use chrono::{NaiveDate, Utc};
use fitplan_db::{log::LogRepository, plan::PlanRepository};
use fitplan_model::log::{DailySummary, NewFoodEntry, NewWeightEntry};
use log::info;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[post("/log/weight/{user_id}")]
pub async fn log_weight(
    logs: web::Data<dyn LogRepository>,
    user_id: web::Path<String>,
    entry: web::Json<NewWeightEntry>,
) -> Result<HttpResponse, ApiError> {
    let entry = entry.validate(&user_id, Utc::now().date_naive())?;
    info!("Logging weight for {}", user_id);
    logs.store_weight(&entry).await?;
    Ok(HttpResponse::Created().json(entry))
}

#[get("/log/weight/{user_id}")]
pub async fn get_weights(
    logs: web::Data<dyn LogRepository>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(logs.fetch_weights(&user_id).await?))
}

#[post("/log/food/{user_id}")]
pub async fn log_food(
    logs: web::Data<dyn LogRepository>,
    user_id: web::Path<String>,
    entry: web::Json<NewFoodEntry>,
) -> Result<HttpResponse, ApiError> {
    let entry = entry.validate(&user_id, Utc::now().date_naive())?;
    info!("Logging food for {}", user_id);
    logs.store_food(&entry).await?;
    Ok(HttpResponse::Created().json(entry))
}

#[derive(Deserialize)]
pub struct DayQuery {
    date: Option<NaiveDate>,
}

#[get("/log/food/{user_id}")]
pub async fn get_food(
    logs: web::Data<dyn LogRepository>,
    plans: web::Data<dyn PlanRepository>,
    user_id: web::Path<String>,
    query: web::Query<DayQuery>,
) -> Result<HttpResponse, ApiError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let entries = logs.fetch_food(&user_id, date).await?;
    let target = plans
        .fetch_plan(&user_id)
        .await?
        .map(|profile| *profile.active_plan());
    Ok(HttpResponse::Ok().json(DailySummary::new(date, entries, target)))
}

#[delete("/log/food/{user_id}/{entry_id}")]
pub async fn delete_food(
    logs: web::Data<dyn LogRepository>,
    path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, entry_id) = path.into_inner();
    if logs.delete_food(&user_id, entry_id).await? {
        info!("Deleted food entry {} for {}", entry_id, user_id);
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::NotFound(format!("no food entry {}", entry_id)))
    }
}
