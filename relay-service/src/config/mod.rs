use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub routing: RoutingConfig,
    pub google: GoogleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub port: u16,
}

/// Downstream destinations chosen by purchase classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    pub staging_url: String,
    pub production_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// Service account key JSON used to build the Play API client.
    /// Injected via environment so tests can substitute credentials.
    pub service_account_json: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                port: std::env::var("APP_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()?,
            },
            routing: RoutingConfig {
                staging_url: std::env::var("STAGING_URL")?,
                production_url: std::env::var("PRODUCTION_URL")?,
            },
            google: GoogleConfig {
                service_account_json: std::env::var("GOOGLE_SERVICE_ACCOUNT_JSON")?,
            },
        })
    }
}
