//! Unauthenticated API probe

use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

#[get("/test")]
pub async fn test() -> impl Responder {
    HttpResponse::Ok().json(json!({ "success": true, "message": "API test route working" }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(test);
}
