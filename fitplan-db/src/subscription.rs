use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitplan_model::subscription::Subscription;
use log::debug;

use crate::{connection::Connection, parse_column, Result};

#[mockall::automock]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn store_subscription(&self, subscription: &Subscription) -> Result<()>;
    async fn fetch_subscription(&self, user_id: &str) -> Result<Option<Subscription>>;
}

#[derive(Clone)]
pub struct SubscriptionRepositoryImpl {
    connection: Connection,
}

impl SubscriptionRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionRepositoryImpl {
    async fn store_subscription(&self, subscription: &Subscription) -> Result<()> {
        debug!(
            "Storing {} subscription for {}",
            subscription.status, subscription.user_id
        );
        sqlx::query(
            "INSERT INTO subscriptions (user_id, status, expires_at) VALUES (?, ?, ?)
            ON CONFLICT (user_id) DO UPDATE SET
                status = excluded.status,
                expires_at = excluded.expires_at",
        )
        .bind(&subscription.user_id)
        .bind(subscription.status.as_ref())
        .bind(subscription.expires_at)
        .execute(&mut *self.connection.lock().await)
        .await?;
        Ok(())
    }

    async fn fetch_subscription(&self, user_id: &str) -> Result<Option<Subscription>> {
        let row: Option<(String, String, Option<DateTime<Utc>>)> = sqlx::query_as(
            "SELECT user_id, status, expires_at FROM subscriptions WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&mut *self.connection.lock().await)
        .await?;

        row.map(|(user_id, status, expires_at)| {
            Ok(Subscription {
                user_id,
                status: parse_column("status", &status)?,
                expires_at,
            })
        })
        .transpose()
    }
}
