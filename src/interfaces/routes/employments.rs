use actix_web::web;

use crate::handlers::employment;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/employments")
            .route(web::post().to(employment::create_employment))
    );

    cfg.service(
        web::resource("/users/{user_id}/employments")
            .route(web::post().to(employment::create_user_employment))
    );
}
