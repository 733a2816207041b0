use std::io;
use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use relay_service::{handlers::register_routes, Config, NotificationRelay};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting relay service");

    let config = Config::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Invalid config: {}", e)))?;

    let relay = NotificationRelay::with_service_account(
        config.routing.clone(),
        config.google.service_account_json.clone(),
    )
    .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Relay init failed: {}", e)))?;
    let relay = Arc::new(relay);

    let addr = format!("0.0.0.0:{}", config.app.port);
    tracing::info!(env = %config.app.env, "Starting HTTP server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(relay.clone()))
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(|| async { "OK" }))
            .route("/", web::get().to(|| async { "Relay Service v1.0" }))
            .configure(register_routes)
    })
    .bind(&addr)?
    .run()
    .await
}
