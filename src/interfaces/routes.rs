use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod employments;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .service(health_check)
            .configure(employments::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
