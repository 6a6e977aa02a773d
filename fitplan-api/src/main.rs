use std::{error::Error, sync::Arc};

use actix_cors::Cors;
use actix_web::{App, HttpServer};
use fitplan_api::{
    config::{self, Config},
    llm::ChatCompletionsGenerator,
    payment::HostedCheckout,
    Services,
};
use fitplan_db::{
    connection::Connection, log::LogRepositoryImpl, plan::PlanRepositoryImpl,
    subscription::SubscriptionRepositoryImpl,
};
use log::info;

fn cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;
    dotenv::dotenv().ok();
    let config = Config::load("config.ron")?;

    info!("Connecting to database");
    let conn = Connection::establish().await?;

    let services = Services {
        plans: Arc::new(PlanRepositoryImpl::new(conn.clone())),
        logs: Arc::new(LogRepositoryImpl::new(conn.clone())),
        subscriptions: Arc::new(SubscriptionRepositoryImpl::new(conn.clone())),
        generator: Arc::new(ChatCompletionsGenerator::new(
            config.llm.endpoint.clone(),
            config.llm.model.clone(),
            config::secret("LLM_API_KEY"),
        )),
        payments: Arc::new(HostedCheckout::new(
            config.payment.clone(),
            config::secret("PAYMENT_ACCESS_TOKEN"),
        )),
    };

    info!("Starting server on {}:{}", config.host, config.port);
    let allowed_origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_origins))
            .configure(|cfg| services.configure(cfg))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
