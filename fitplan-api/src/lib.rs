pub mod config;
pub mod error;
pub mod handlers;
pub mod llm;
pub mod payment;
pub mod prompts;

use std::sync::Arc;

use actix_web::web;
use fitplan_db::{
    log::LogRepository, plan::PlanRepository, subscription::SubscriptionRepository,
};

use crate::{error::ApiError, llm::TextGenerator, payment::PaymentGateway};

/// Everything the handlers depend on, shared between worker threads.
#[derive(Clone)]
pub struct Services {
    pub plans: Arc<dyn PlanRepository>,
    pub logs: Arc<dyn LogRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub generator: Arc<dyn TextGenerator>,
    pub payments: Arc<dyn PaymentGateway>,
}

impl Services {
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.plans.clone()))
            .app_data(web::Data::from(self.logs.clone()))
            .app_data(web::Data::from(self.subscriptions.clone()))
            .app_data(web::Data::from(self.generator.clone()))
            .app_data(web::Data::from(self.payments.clone()))
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
            )
            .app_data(
                web::QueryConfig::default()
                    .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
            )
            .app_data(
                web::PathConfig::default()
                    .error_handler(|err, _req| ApiError::NotFound(err.to_string()).into()),
            );
        handlers::configure(cfg);
    }
}
