use std::{env, error::Error};

use chrono::{Duration, Utc};
use fitplan_db::{
    connection::Connection,
    subscription::{SubscriptionRepository, SubscriptionRepositoryImpl},
};
use fitplan_model::subscription::{Subscription, SubscriptionStatus};
use log::info;

const DEFAULT_DAYS: u32 = 30;
const MAX_DAYS: u32 = 3650;

fn parse_days(arg: Option<&str>) -> Result<Duration, Box<dyn Error>> {
    let days = match arg {
        Some(days) => days.parse::<u32>()?,
        None => DEFAULT_DAYS,
    };
    if days == 0 || days > MAX_DAYS {
        return Err(format!("days must be between 1 and {}", MAX_DAYS).into());
    }
    Ok(Duration::try_days(days.into()).ok_or("days out of range")?)
}

/// Activates a user's pro subscription once their payment has been confirmed.
///
/// Usage: grant-subscription <user_id> [days]
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;

    let mut args = env::args().skip(1);
    let user_id = args
        .next()
        .ok_or("usage: grant-subscription <user_id> [days]")?;
    let duration = parse_days(args.next().as_deref())?;

    info!("Connecting to database");
    let conn = Connection::establish().await?;
    let repository = SubscriptionRepositoryImpl::new(conn);

    let expires_at = Utc::now()
        .checked_add_signed(duration)
        .ok_or("expiry date out of range")?;
    repository
        .store_subscription(&Subscription {
            user_id: user_id.clone(),
            status: SubscriptionStatus::Active,
            expires_at: Some(expires_at),
        })
        .await?;

    info!("Granted pro access to {} until {}", user_id, expires_at);
    Ok(())
}
