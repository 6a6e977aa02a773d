use async_trait::async_trait;
use fitplan_model::subscription::{CheckoutRequest, CheckoutSession};
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::PaymentConfig;

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment gateway unreachable")]
    CommunicationError,
    #[error("payment gateway rejected the request with status {0}")]
    StatusError(u16),
    #[error("incorrect payment gateway response")]
    ResponseError,
}

#[mockall::automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_preference(
        &self,
        checkout: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;
}

#[derive(Serialize)]
struct Item<'a> {
    title: &'a str,
    quantity: u32,
    unit_price: f64,
    currency_id: &'a str,
}

#[derive(Serialize)]
struct Payer<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct PreferenceRequest<'a> {
    items: Vec<Item<'a>>,
    external_reference: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    payer: Option<Payer<'a>>,
}

#[derive(Deserialize)]
struct PreferenceResponse {
    id: String,
    init_point: String,
}

/// Creates checkout preferences on a hosted payment gateway.
pub struct HostedCheckout {
    config: PaymentConfig,
    access_token: String,
    client: reqwest::Client,
}

impl HostedCheckout {
    pub fn new(config: PaymentConfig, access_token: String) -> Self {
        Self {
            config,
            access_token,
            client: reqwest::Client::new(),
        }
    }

    fn preference<'a>(&'a self, checkout: &'a CheckoutRequest) -> PreferenceRequest<'a> {
        PreferenceRequest {
            items: vec![Item {
                title: &self.config.title,
                quantity: 1,
                unit_price: self.config.unit_price,
                currency_id: &self.config.currency,
            }],
            external_reference: &checkout.user_id,
            payer: checkout.email.as_deref().map(|email| Payer { email }),
        }
    }
}

#[async_trait]
impl PaymentGateway for HostedCheckout {
    async fn create_preference(
        &self,
        checkout: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        info!("Creating checkout preference for {}", checkout.user_id);
        let response: PreferenceResponse = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.access_token)
            .json(&self.preference(checkout))
            .send()
            .await
            .map_err(|_| PaymentError::CommunicationError)
            .and_then(|resp| {
                if resp.status().is_success() {
                    Ok(resp)
                } else {
                    Err(PaymentError::StatusError(resp.status().as_u16()))
                }
            })?
            .json()
            .await
            .map_err(|_| PaymentError::ResponseError)?;

        Ok(CheckoutSession {
            preference_id: response.id,
            checkout_url: response.init_point,
        })
    }
}
