use actix_web::{web, HttpResponse, Responder};

use crate::{entities::employment::CreateUserEmploymentRequest, errors::AppError, AppState};

pub async fn create_employment(
    state: web::Data<AppState>,
    payload: web::Json<CreateUserEmploymentRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.employment_handler
        .create_user_employment(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// Same as [`create_employment`], but the user id comes from the path and wins over the body.
pub async fn create_user_employment(
    state: web::Data<AppState>,
    user_id: web::Path<i32>,
    payload: web::Json<CreateUserEmploymentRequest>,
) -> Result<impl Responder, AppError> {
    let request = CreateUserEmploymentRequest {
        user_id: Some(user_id.into_inner()),
        ..payload.into_inner()
    };

    let response = state.employment_handler
        .create_user_employment(request).await?;

    Ok(HttpResponse::Created().json(response))
}
