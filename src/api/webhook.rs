use crate::bot;
use crate::bot::payload::WebhookPayload;
use crate::config::AppConfig;
use crate::db::UserOperations;
use crate::enums::common::{ErrorDetail, WebhookAck};
use crate::AppState;
use actix_web::middleware::NormalizePath;
use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use utoipa_actix_web::{scope, service_config::ServiceConfig};

const SUBSCRIBE_MODE: &str = "subscribe";

pub fn config(cfg: &mut ServiceConfig, state: &AppState) {
    cfg.service(
        scope::scope("/webhook")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(state.config.clone()))
            .app_data(web::Data::new(state.user_ops.clone()))
            .service(verify_webhook)
            .service(receive_webhook),
    );
}

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

#[utoipa::path(
    get,
    tag = "Webhook",
    path = "",
    responses(
        (status = 200, description = "Subscription verified, challenge echoed", body = String),
        (status = 403, description = "Mode or verify token mismatch")
    ),
    summary = "Verify the webhook subscription"
)]
#[get("")]
pub(super) async fn verify_webhook(
    config: web::Data<AppConfig>,
    query: web::Query<VerifyParams>,
) -> impl Responder {
    let VerifyParams {
        mode,
        verify_token,
        challenge,
    } = query.into_inner();

    info!("Webhook verification request, mode: {:?}", mode);

    if mode.as_deref() == Some(SUBSCRIBE_MODE)
        && verify_token.as_deref() == Some(config.whatsapp_verify_token.as_str())
    {
        info!("Webhook verified");
        HttpResponse::Ok()
            .content_type("text/plain")
            .body(challenge.unwrap_or_default())
    } else {
        error!("Webhook verification failed");
        HttpResponse::Forbidden().json(ErrorDetail::new("Forbidden"))
    }
}

#[utoipa::path(
    post,
    tag = "Webhook",
    path = "",
    request_body = String,
    responses(
        (status = 200, description = "Event acknowledged", body = WebhookAck),
        (status = 500, description = "Request body is not valid JSON", body = WebhookAck)
    ),
    summary = "Receive a webhook event"
)]
#[post("")]
pub(super) async fn receive_webhook(
    user_ops: web::Data<UserOperations>,
    body: web::Bytes,
) -> impl Responder {
    let event: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            error!("WEBHOOK: receive_webhook(): invalid JSON payload: {}", e);
            return HttpResponse::InternalServerError().json(WebhookAck {
                status: "error".to_string(),
                message: Some("Internal Server Error".to_string()),
            });
        }
    };

    debug!("Webhook event received: {}", event);

    // Valid JSON always gets acknowledged; shapes we do not recognize
    // degrade to an empty event rather than an error.
    let payload: WebhookPayload = serde_json::from_value(event).unwrap_or_else(|e| {
        warn!("WEBHOOK: receive_webhook(): undecodable event shape: {}", e);
        WebhookPayload::default()
    });

    bot::process_event(user_ops.get_ref(), payload);

    HttpResponse::Ok().json(WebhookAck {
        status: "success".to_string(),
        message: None,
    })
}
