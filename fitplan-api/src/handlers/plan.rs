use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use fitplan_db::plan::PlanRepository;
use fitplan_model::{
    calculator,
    plan::{PlanBundle, PlanProfile},
    request::PlanRequest,
};
use log::{debug, error, info};
use serde::Serialize;

use crate::error::ApiError;

#[derive(Serialize)]
struct PlanResponse {
    plan: PlanBundle,
}

#[derive(Serialize)]
struct StoredPlanResponse {
    exists: bool,
    data: Option<PlanProfile>,
}

#[post("/plan/calculate")]
pub async fn calculate_plan(
    plans: web::Data<dyn PlanRepository>,
    request: web::Json<PlanRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let (input, goal) = request.validate()?;
    let plan = calculator::calculate(&input);
    debug!("Calculated plan {:?} from {:?}", plan, input);

    if let Some(user_id) = request.user_id.filter(|id| !id.trim().is_empty()) {
        info!("Storing plan for {}", user_id);
        let profile = PlanProfile::new(user_id, input, goal, plan.clone(), Utc::now());
        if let Err(source) = plans.store_plan(&profile).await {
            error!("Failed to store plan for {}: {}", profile.user_id, source);
            return Err(ApiError::PlanNotSaved { source, plan });
        }
    }

    Ok(HttpResponse::Ok().json(PlanResponse { plan }))
}

#[get("/plan/{user_id}")]
pub async fn get_plan(
    plans: web::Data<dyn PlanRepository>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let data = plans.fetch_plan(&user_id).await?;
    Ok(HttpResponse::Ok().json(StoredPlanResponse {
        exists: data.is_some(),
        data,
    }))
}
