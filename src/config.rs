use dotenvy::var;

pub const DEFAULT_VERIFY_TOKEN: &str = "chopwave_verify_token";

#[derive(Clone)]
pub struct AppConfig {
    pub whatsapp_verify_token: String,
    /// Held for the outbound send integration; nothing reads it yet.
    pub whatsapp_access_token: String,
    /// Held for the payment gateway integration; nothing reads it yet.
    pub cinetpay_api_key: String,
    pub database_url: Option<String>,
    pub port: u16,
    pub environment: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let whatsapp_verify_token =
            var("WHATSAPP_VERIFY_TOKEN").unwrap_or_else(|_| DEFAULT_VERIFY_TOKEN.to_string());
        let whatsapp_access_token = var("WHATSAPP_ACCESS_TOKEN").unwrap_or_default();
        let cinetpay_api_key = var("CINETPAY_API_KEY").unwrap_or_default();
        let database_url = var("DATABASE_URL").ok();
        let port = var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8000);
        let environment = var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Self {
            whatsapp_verify_token,
            whatsapp_access_token,
            cinetpay_api_key,
            database_url,
            port,
            environment,
        }
    }
}
