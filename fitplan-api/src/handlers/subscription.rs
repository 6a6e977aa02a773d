use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use fitplan_db::subscription::SubscriptionRepository;
use fitplan_model::subscription::{
    CheckoutRequest, Subscription, SubscriptionState, SubscriptionStatus,
};
use log::{error, info};

use crate::{error::ApiError, payment::PaymentGateway};

#[get("/subscription/{user_id}")]
pub async fn get_subscription(
    subscriptions: web::Data<dyn SubscriptionRepository>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let subscription = subscriptions.fetch_subscription(&user_id).await?;
    Ok(HttpResponse::Ok().json(SubscriptionState::new(
        &user_id,
        subscription.as_ref(),
        Utc::now(),
    )))
}

/// Starts a checkout. Users without a running subscription are marked
/// pending until the payment is confirmed.
#[post("/subscription/checkout")]
pub async fn checkout(
    subscriptions: web::Data<dyn SubscriptionRepository>,
    payments: web::Data<dyn PaymentGateway>,
    request: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, ApiError> {
    if request.user_id.trim().is_empty() {
        return Err(ApiError::BadRequest("missing required field: user_id".to_owned()));
    }

    let session = payments.create_preference(&request).await.map_err(|e| {
        error!("Failed to create checkout for {}: {}", request.user_id, e);
        ApiError::Upstream(e.to_string())
    })?;

    let current = subscriptions.fetch_subscription(&request.user_id).await?;
    if !current.map_or(false, |s| s.is_pro(Utc::now())) {
        info!("Marking subscription for {} as pending", request.user_id);
        subscriptions
            .store_subscription(&Subscription {
                user_id: request.user_id.clone(),
                status: SubscriptionStatus::Pending,
                expires_at: None,
            })
            .await?;
    }

    Ok(HttpResponse::Ok().json(session))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use fitplan_model::subscription::CheckoutSession;
    use serde_json::{json, Value};

    use crate::{
        handlers::testing::{active_subscription, TestServices},
        payment::PaymentError,
    };

    use super::*;

    #[actix_web::test]
    async fn status_of_unknown_user() {
        let mut services = TestServices::new();
        services
            .subscriptions
            .expect_fetch_subscription()
            .returning(|_| Ok(None));
        let services = services.build();
        let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

        let req = test::TestRequest::get().uri("/subscription/user-1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({"user_id": "user-1", "is_pro": false, "status": null, "expires_at": null})
        );
    }

    #[actix_web::test]
    async fn status_of_pro_user() {
        let mut services = TestServices::new();
        services
            .subscriptions
            .expect_fetch_subscription()
            .returning(|user_id| Ok(Some(active_subscription(user_id))));
        let services = services.build();
        let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

        let req = test::TestRequest::get().uri("/subscription/user-1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["is_pro"], true);
        assert_eq!(body["status"], "active");
    }

    #[actix_web::test]
    async fn checkout_marks_subscription_pending() {
        let mut services = TestServices::new();
        services.payments.expect_create_preference().returning(|_| {
            Ok(CheckoutSession {
                preference_id: "pref-1".to_owned(),
                checkout_url: "https://pay.example.com/pref-1".to_owned(),
            })
        });
        services
            .subscriptions
            .expect_fetch_subscription()
            .returning(|_| Ok(None));
        services
            .subscriptions
            .expect_store_subscription()
            .withf(|s| s.user_id == "user-1" && s.status == SubscriptionStatus::Pending)
            .times(1)
            .returning(|_| Ok(()));
        let services = services.build();
        let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/subscription/checkout")
            .set_json(json!({"user_id": "user-1", "email": "user@example.com"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({"preference_id": "pref-1", "checkout_url": "https://pay.example.com/pref-1"})
        );
    }

    #[actix_web::test]
    async fn checkout_keeps_running_subscription() {
        let mut services = TestServices::new();
        services.payments.expect_create_preference().returning(|_| {
            Ok(CheckoutSession {
                preference_id: "pref-2".to_owned(),
                checkout_url: "https://pay.example.com/pref-2".to_owned(),
            })
        });
        services
            .subscriptions
            .expect_fetch_subscription()
            .returning(|user_id| Ok(Some(active_subscription(user_id))));
        services.subscriptions.expect_store_subscription().never();
        let services = services.build();
        let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/subscription/checkout")
            .set_json(json!({"user_id": "user-1"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn gateway_failure_is_bad_gateway() {
        let mut services = TestServices::new();
        services
            .payments
            .expect_create_preference()
            .returning(|_| Err(PaymentError::StatusError(401)));
        services.subscriptions.expect_store_subscription().never();
        let services = services.build();
        let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/subscription/checkout")
            .set_json(json!({"user_id": "user-1"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }
}
