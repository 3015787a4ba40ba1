#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use actix_web::{web, App, HttpResponse, HttpServer};
use chopwave::config::AppConfig;
use chopwave::{api, AppState};
use dotenvy::dotenv;
use utoipa_actix_web::AppExt;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let config = AppConfig::from_env();
    if config.database_url.is_none() {
        error!("DATABASE_URL is not set; data store requests will fail with 503");
    }
    if config.whatsapp_access_token.is_empty() {
        warn!("WHATSAPP_ACCESS_TOKEN is not set; outbound sends stay log-only");
    }
    if config.cinetpay_api_key.is_empty() {
        warn!("CINETPAY_API_KEY is not set; payments are disabled");
    }

    let state = AppState::new(config);

    const HOST: &str = "0.0.0.0";
    let port = state.config.port;
    info!(
        "Starting server at http://{}:{} ({})",
        HOST, port, state.config.environment
    );

    HttpServer::new(move || {
        let state = state.clone();
        let (app, mut api_doc) = App::new()
            .into_utoipa_app()
            .map(|app| {
                app.app_data(web::JsonConfig::default().error_handler(api::default_error_handler))
            })
            .configure(|cfg| api::configure(cfg, &state))
            .split_for_parts();

        api_doc.info.title = "ChopWave API".to_string();
        api_doc.info.description =
            Some("Food ordering and delivery bot backend for Cameroon".to_string());
        api_doc.info.version = env!("CARGO_PKG_VERSION").to_string();

        app.route(
            "/api-docs/openapi.json",
            web::get().to(move || {
                let api_doc = api_doc.clone();
                async move { HttpResponse::Ok().json(api_doc) }
            }),
        )
    })
    .bind((HOST, port))?
    .run()
    .await
}
