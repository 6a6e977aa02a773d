use async_trait::async_trait;
use fitplan_model::{
    generated::{Recipe, RecipeRequest},
    log::{NewWeightEntry, WeightEntry},
    plan::{PlanBundle, PlanProfile},
    request::{PlanRequest, ValidationError},
};
use serde::{de::DeserializeOwned, Deserialize};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("server unreachable")]
    CommunicationError,
    #[error("internal server error")]
    InternalServerError,
    #[error("invalid request")]
    RequestError,
    #[error("incorrect server response")]
    ResponseError,
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),
    #[error("{error}")]
    PlanNotSaved { error: String, plan: PlanBundle },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Deserialize)]
struct PlanResponse {
    plan: PlanBundle,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
    #[serde(default)]
    plan: Option<PlanBundle>,
}

#[derive(Deserialize)]
struct StoredPlanResponse {
    data: Option<PlanProfile>,
}

#[derive(Deserialize)]
struct RecipeResponse {
    recipe: Recipe,
}

#[mockall::automock]
#[async_trait]
pub trait Client: Send + Sync {
    async fn calculate_plan(&self, request: &PlanRequest) -> Result<PlanBundle>;
    async fn get_plan(&self, user_id: &str) -> Result<Option<PlanProfile>>;
    async fn log_weight(&self, user_id: &str, entry: &NewWeightEntry) -> Result<WeightEntry>;
    async fn get_weights(&self, user_id: &str) -> Result<Vec<WeightEntry>>;
    async fn generate_recipe(&self, request: &RecipeRequest) -> Result<Recipe>;
}

pub struct ClientImpl {
    url: String,
    client: reqwest::Client,
}

impl ClientImpl {
    fn new(url: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_owned(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url, path)
    }
}

pub fn create(url: String) -> impl Client {
    ClientImpl::new(url)
}

/// A failed save still carries the calculated plan in the error body.
fn server_error(body: &str) -> Error {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            error,
            plan: Some(plan),
        }) => Error::PlanNotSaved { error, plan },
        _ => Error::InternalServerError,
    }
}

async fn read_json<T: DeserializeOwned>(
    response: std::result::Result<reqwest::Response, reqwest::Error>,
) -> Result<T> {
    response
        .map_err(|_| Error::CommunicationError)
        .and_then(|resp| {
            if resp.status().is_client_error() {
                Err(Error::RequestError)
            } else if resp.status().is_server_error() {
                Err(Error::InternalServerError)
            } else {
                Ok(resp)
            }
        })?
        .json()
        .await
        .map_err(|_| Error::ResponseError)
}

#[async_trait]
impl Client for ClientImpl {
    async fn calculate_plan(&self, request: &PlanRequest) -> Result<PlanBundle> {
        request.validate()?;
        let response = self
            .client
            .post(self.endpoint("plan/calculate"))
            .json(request)
            .send()
            .await
            .map_err(|_| Error::CommunicationError)?;
        if response.status().is_server_error() {
            let body = response.text().await.map_err(|_| Error::ResponseError)?;
            return Err(server_error(&body));
        }
        read_json::<PlanResponse>(Ok(response)).await.map(|r| r.plan)
    }

    async fn get_plan(&self, user_id: &str) -> Result<Option<PlanProfile>> {
        let response = self
            .client
            .get(self.endpoint(&format!("plan/{}", user_id)))
            .send()
            .await;
        read_json::<StoredPlanResponse>(response)
            .await
            .map(|r| r.data)
    }

    async fn log_weight(&self, user_id: &str, entry: &NewWeightEntry) -> Result<WeightEntry> {
        let response = self
            .client
            .post(self.endpoint(&format!("log/weight/{}", user_id)))
            .json(entry)
            .send()
            .await;
        read_json(response).await
    }

    async fn get_weights(&self, user_id: &str) -> Result<Vec<WeightEntry>> {
        let response = self
            .client
            .get(self.endpoint(&format!("log/weight/{}", user_id)))
            .send()
            .await;
        read_json(response).await
    }

    async fn generate_recipe(&self, request: &RecipeRequest) -> Result<Recipe> {
        let response = self
            .client
            .post(self.endpoint("ai/recipe"))
            .json(request)
            .send()
            .await;
        read_json::<RecipeResponse>(response)
            .await
            .map(|r| r.recipe)
    }
}
