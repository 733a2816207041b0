use std::time::Duration;

use crate::error::{RelayError, Result};

// Matches the transport budget of the original relay: 5s to establish the
// connection (TLS handshake included), 10s for the whole round trip.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers the re-packaged envelope to a downstream endpoint.
///
/// A completed round trip counts as success regardless of HTTP status; the
/// downstream services own their redelivery story and a non-2xx here must not
/// make Pub/Sub redeliver the notification. Non-success statuses are logged.
pub struct Forwarder {
    http_client: reqwest::Client,
}

impl Forwarder {
    pub fn new() -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RelayError::Forward(e.to_string()))?;
        Ok(Self { http_client })
    }

    pub async fn forward(&self, url: &str, body: &[u8]) -> Result<()> {
        tracing::info!(%url, body = %String::from_utf8_lossy(body), "Forwarding envelope");

        let response = self
            .http_client
            .post(url)
            .body(body.to_vec())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(%url, error = %e, "Failed to send forward request");
                RelayError::Forward(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(%url, %status, "Envelope forwarded");
        } else {
            tracing::warn!(%url, %status, "Downstream returned non-success status");
        }

        Ok(())
    }
}
