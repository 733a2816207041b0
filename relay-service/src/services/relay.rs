use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use play_verify::{PlayClient, PlayError, SubscriptionPurchase, SubscriptionVerifier};
use tracing::{error, info, warn};

use crate::config::RoutingConfig;
use crate::error::{RelayError, Result};
use crate::models::{Envelope, SubscriptionNotification};
use crate::services::forwarder::Forwarder;

/// Destination chosen by purchase classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingTarget {
    Staging,
    Production,
}

impl RoutingConfig {
    pub fn url_for(&self, target: RoutingTarget) -> &str {
        match target {
            RoutingTarget::Staging => &self.staging_url,
            RoutingTarget::Production => &self.production_url,
        }
    }
}

/// Relays Play Billing developer notifications to staging or production.
///
/// Each invocation is independent: decode the payload, verify real purchases
/// against the Play API, and forward the re-packaged envelope to the
/// destination the classification picks. Test notifications and sandbox
/// purchases go to staging; everything else goes to production.
pub struct NotificationRelay {
    routing: RoutingConfig,
    verifier: Arc<dyn SubscriptionVerifier>,
    forwarder: Forwarder,
}

impl NotificationRelay {
    pub fn new(routing: RoutingConfig, verifier: Arc<dyn SubscriptionVerifier>) -> Result<Self> {
        Ok(Self {
            routing,
            verifier,
            forwarder: Forwarder::new()?,
        })
    }

    /// Build a relay whose verifier constructs a Play client from the
    /// service account key JSON on each verification, mirroring the
    /// per-invocation client construction of the hosted deployment. A bad
    /// key therefore only surfaces on the verification path; test
    /// notifications still route.
    pub fn with_service_account(routing: RoutingConfig, json_key: String) -> Result<Self> {
        Self::new(routing, Arc::new(JsonKeyVerifier { json_key }))
    }

    /// Handle one inbound notification payload.
    pub async fn handle(&self, raw: &[u8]) -> Result<()> {
        info!(payload = %String::from_utf8_lossy(raw), "Incoming notification");

        let forward_body = self.build_forward_body(raw);

        // Decode failure is non-fatal: continue with a default structure and
        // let the shape checks below decide what happens.
        let notification: SubscriptionNotification = match serde_json::from_slice(raw) {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "Failed to decode payload as SubscriptionNotification");
                SubscriptionNotification::default()
            }
        };

        if notification.test_notification.is_some() {
            info!("Test notification received; routing to staging");
            return self
                .forwarder
                .forward(self.routing.url_for(RoutingTarget::Staging), &forward_body)
                .await;
        }

        let Some(detail) = notification.subscription_notification.as_ref() else {
            error!("Payload carries neither a test marker nor a subscription notification");
            return Err(RelayError::InvalidShape(
                "neither testNotification nor subscriptionNotification present".to_string(),
            ));
        };

        let purchase = match self
            .verifier
            .verify_subscription(
                &notification.package_name,
                &detail.subscription_id,
                &detail.purchase_token,
            )
            .await
        {
            Ok(purchase) => purchase,
            Err(e @ PlayError::KeyParseError(_)) => {
                error!(error = %e, "Failed to construct Play verification client");
                return Err(RelayError::VerifierInit(e.to_string()));
            }
            Err(e) => {
                error!(error = %e, "Subscription verification failed");
                return Err(RelayError::Verification(e));
            }
        };

        let target = classify(&purchase);
        info!(
            purchase_type = ?purchase.purchase_type,
            ?target,
            "Subscription verified; routing notification"
        );

        self.forwarder
            .forward(self.routing.url_for(target), &forward_body)
            .await
    }

    /// Wrap the raw payload in the downstream envelope. Serialization
    /// failure is non-fatal: log and fall back to an empty body.
    fn build_forward_body(&self, raw: &[u8]) -> Vec<u8> {
        let envelope = Envelope::new(STANDARD.encode(raw));
        match serde_json::to_vec(&envelope) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Failed to serialize forward envelope; sending empty body");
                Vec::new()
            }
        }
    }
}

/// Sandbox purchases (`purchaseType` 0) go to staging; any other value, or
/// an absent field, means a production purchase.
fn classify(purchase: &SubscriptionPurchase) -> RoutingTarget {
    if purchase.is_test_purchase() {
        RoutingTarget::Staging
    } else {
        RoutingTarget::Production
    }
}

/// Constructs a `PlayClient` from the key JSON per verification call.
struct JsonKeyVerifier {
    json_key: String,
}

#[async_trait]
impl SubscriptionVerifier for JsonKeyVerifier {
    async fn verify_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> std::result::Result<SubscriptionPurchase, PlayError> {
        let client = PlayClient::from_json_key(&self.json_key)?;
        client
            .verify_subscription(package_name, subscription_id, purchase_token)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sandbox_purchase() {
        let purchase = SubscriptionPurchase {
            purchase_type: Some(0),
            ..Default::default()
        };
        assert_eq!(classify(&purchase), RoutingTarget::Staging);
    }

    #[test]
    fn test_classify_promo_purchase() {
        let purchase = SubscriptionPurchase {
            purchase_type: Some(1),
            ..Default::default()
        };
        assert_eq!(classify(&purchase), RoutingTarget::Production);
    }

    #[test]
    fn test_classify_production_purchase() {
        // Production purchases omit purchaseType entirely
        assert_eq!(
            classify(&SubscriptionPurchase::default()),
            RoutingTarget::Production
        );
    }

    #[test]
    fn test_url_for_target() {
        let routing = RoutingConfig {
            staging_url: "https://staging.example.com/hook".to_string(),
            production_url: "https://prod.example.com/hook".to_string(),
        };
        assert_eq!(
            routing.url_for(RoutingTarget::Staging),
            "https://staging.example.com/hook"
        );
        assert_eq!(
            routing.url_for(RoutingTarget::Production),
            "https://prod.example.com/hook"
        );
    }
}
