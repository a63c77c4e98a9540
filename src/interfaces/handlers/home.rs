use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the Employment API!",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
