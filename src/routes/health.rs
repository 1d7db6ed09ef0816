use actix_web::{get, HttpResponse, Responder};

use crate::response::ApiResponse;

/// Health probe. Unauthenticated.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::message("TaskMaster API is running"))
}
