use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use fitplan_model::{plan::PlanBundle, request::ValidationError};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("plan calculated but could not be saved: {source}")]
    PlanNotSaved {
        source: fitplan_db::Error,
        plan: PlanBundle,
    },
    #[error("{0}")]
    Database(#[from] fitplan_db::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("a pro subscription is required")]
    ProRequired,
    #[error("upstream service failed: {0}")]
    Upstream(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<&'a PlanBundle>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::PlanNotSaved { .. } | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ProRequired => StatusCode::FORBIDDEN,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let plan = match self {
            ApiError::PlanNotSaved { plan, .. } => Some(plan),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            plan,
        })
    }
}
