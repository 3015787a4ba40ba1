mod errors;
pub mod menu;
pub mod orders;
pub mod restaurants;
pub mod users;
pub mod webhook;

use crate::enums::common::{HealthResponse, RootResponse};
use crate::AppState;
use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
pub use errors::default_error_handler;
pub(crate) use errors::error_response;
use utoipa_actix_web::service_config::ServiceConfig;

pub const SERVICE_NAME: &str = "ChopWave Backend";

#[utoipa::path(
    get,
    tag = "Service",
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = RootResponse)
    ),
    summary = "Service banner"
)]
#[get("/")]
async fn root_endpoint() -> impl Responder {
    HttpResponse::Ok().json(RootResponse {
        message: "ChopWave API - food ordering and delivery over WhatsApp".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "active".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[utoipa::path(
    get,
    tag = "Service",
    path = "/health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    ),
    summary = "Health check"
)]
#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
    })
}

pub fn configure(cfg: &mut ServiceConfig, state: &AppState) {
    cfg.service(root_endpoint).service(health_check);
    webhook::config(cfg, state);
    restaurants::config(cfg, &state.restaurant_ops, &state.menu_ops);
    menu::config(cfg, &state.menu_ops);
    users::config(cfg, &state.user_ops);
    orders::config(cfg, &state.order_ops);
}
