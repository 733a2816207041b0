use serde::{Deserialize, Serialize};

/// Google Service Account Key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    pub client_id: String,
    pub auth_uri: String,
    pub token_uri: String,
}

/// OAuth2 Token Cache
#[derive(Debug, Clone)]
pub struct TokenCache {
    pub access_token: String,
    pub expires_at: i64,
}

/// JWT Claims for Google OAuth2
#[derive(Debug, Serialize)]
pub struct JwtClaims {
    pub iss: String,
    pub sub: String,
    pub scope: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

/// Google OAuth2 Token Response
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

/// Subset of the Play Developer API `SubscriptionPurchase` resource.
///
/// `purchase_type` is only present for purchases that were not made with the
/// standard flow: `0` = test (sandbox/license-tester) purchase, `1` = promo.
/// A production purchase leaves the field absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionPurchase {
    pub kind: Option<String>,
    pub start_time_millis: Option<String>,
    pub expiry_time_millis: Option<String>,
    pub auto_renewing: Option<bool>,
    pub payment_state: Option<i64>,
    pub order_id: Option<String>,
    pub purchase_type: Option<i64>,
    pub acknowledgement_state: Option<i64>,
}

impl SubscriptionPurchase {
    /// True when the purchase was made with a license-tester account.
    pub fn is_test_purchase(&self) -> bool {
        self.purchase_type == Some(0)
    }
}
