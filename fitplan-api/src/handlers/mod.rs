pub mod ai;
pub mod log;
pub mod plan;
pub mod subscription;

#[cfg(test)]
pub(crate) mod testing;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(plan::calculate_plan)
        .service(plan::get_plan)
        .service(log::log_weight)
        .service(log::get_weights)
        .service(log::log_food)
        .service(log::get_food)
        .service(log::delete_food)
        .service(subscription::get_subscription)
        .service(subscription::checkout)
        .service(ai::generate_recipe)
        .service(ai::generate_workout);
}
