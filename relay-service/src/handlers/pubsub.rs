/// Pub/Sub push endpoint for Play Billing developer notifications.
use std::sync::Arc;

use actix_web::{web, HttpResponse};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::RelayError;
use crate::models::PubsubEnvelope;
use crate::services::NotificationRelay;

/// Receive one pushed notification and relay it.
///
/// POST /pubsub/push
///
/// Returns 204 on success. Fatal relay errors map to their status codes via
/// `ResponseError`; a non-2xx response makes Pub/Sub apply its own
/// redelivery policy.
pub async fn push(
    relay: web::Data<Arc<NotificationRelay>>,
    envelope: web::Json<PubsubEnvelope>,
) -> Result<HttpResponse, RelayError> {
    let raw = STANDARD
        .decode(&envelope.message.data)
        .map_err(|e| RelayError::BadPush(format!("message data is not valid base64: {}", e)))?;

    tracing::debug!(
        message_id = %envelope.message.message_id,
        subscription = %envelope.subscription,
        "Received Pub/Sub push"
    );

    relay.handle(&raw).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/pubsub").route("/push", web::post().to(push)));
}
