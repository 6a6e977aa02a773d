use std::sync::Arc;

use chrono::{Duration, Utc};
use fitplan_db::{
    log::MockLogRepository, plan::MockPlanRepository, subscription::MockSubscriptionRepository,
};
use fitplan_model::subscription::{Subscription, SubscriptionStatus};
use serde_json::{json, Value};

use crate::{llm::MockTextGenerator, payment::MockPaymentGateway, Services};

pub struct TestServices {
    pub plans: MockPlanRepository,
    pub logs: MockLogRepository,
    pub subscriptions: MockSubscriptionRepository,
    pub generator: MockTextGenerator,
    pub payments: MockPaymentGateway,
}

impl TestServices {
    pub fn new() -> Self {
        Self {
            plans: MockPlanRepository::new(),
            logs: MockLogRepository::new(),
            subscriptions: MockSubscriptionRepository::new(),
            generator: MockTextGenerator::new(),
            payments: MockPaymentGateway::new(),
        }
    }

    pub fn build(self) -> Services {
        Services {
            plans: Arc::new(self.plans),
            logs: Arc::new(self.logs),
            subscriptions: Arc::new(self.subscriptions),
            generator: Arc::new(self.generator),
            payments: Arc::new(self.payments),
        }
    }
}

pub fn plan_services(plans: MockPlanRepository) -> Services {
    TestServices {
        plans,
        ..TestServices::new()
    }
    .build()
}

pub fn reference_body() -> Value {
    json!({
        "weight_kg": 70,
        "height_cm": 175,
        "age": 25,
        "sex": "male",
        "activity_level": "moderate",
        "goal": "maintain",
    })
}

pub fn active_subscription(user_id: &str) -> Subscription {
    Subscription {
        user_id: user_id.to_owned(),
        status: SubscriptionStatus::Active,
        expires_at: Some(Utc::now() + Duration::days(30)),
    }
}
