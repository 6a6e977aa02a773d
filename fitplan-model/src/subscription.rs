use chrono::{DateTime, Utc};
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SubscriptionStatus {
    Active,
    Pending,
    Cancelled,
    Expired,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subscription {
    pub user_id: String,
    pub status: SubscriptionStatus,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Pro access needs an active subscription that has not lapsed yet.
    pub fn is_pro(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active
            && self.expires_at.map_or(false, |expiry| expiry > now)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubscriptionState {
    pub user_id: String,
    pub is_pro: bool,
    pub status: Option<SubscriptionStatus>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SubscriptionState {
    pub fn new(user_id: &str, subscription: Option<&Subscription>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_owned(),
            is_pro: subscription.map_or(false, |s| s.is_pro(now)),
            status: subscription.map(|s| s.status),
            expires_at: subscription.and_then(|s| s.expires_at),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckoutRequest {
    pub user_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckoutSession {
    pub preference_id: String,
    pub checkout_url: String,
}
