use serde::{Deserialize, Serialize};

/// Envelope expected by the downstream forwarding services.
///
/// Wire format: `{"message": {"data": "<base64 of the original payload>"}}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub message: EnvelopeMessage,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnvelopeMessage {
    pub data: String,
}

impl Envelope {
    pub fn new(base64_data: String) -> Self {
        Self {
            message: EnvelopeMessage { data: base64_data },
        }
    }
}

/// Real-time developer notification as Play Billing publishes it.
///
/// Exactly one of `subscription_notification` / `test_notification` is
/// populated on well-formed input; both absent means the payload is not a
/// notification we can route.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionNotification {
    pub version: String,
    pub package_name: String,
    pub event_time_millis: String,
    pub subscription_notification: Option<SubscriptionDetail>,
    pub test_notification: Option<TestMarker>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionDetail {
    pub version: String,
    pub notification_type: i64,
    pub subscription_id: String,
    pub purchase_token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestMarker {
    pub version: String,
}

/// Pub/Sub push delivery body. Only `message.data` is consumed.
#[derive(Debug, Deserialize)]
pub struct PubsubEnvelope {
    pub message: PubsubMessage,
    #[serde(default)]
    pub subscription: String,
}

#[derive(Debug, Deserialize)]
pub struct PubsubMessage {
    #[serde(default)]
    pub data: String,
    #[serde(default, rename = "messageId")]
    pub message_id: String,
}
