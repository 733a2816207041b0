use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::{Arc, Mutex};

use crate::errors::PlayError;
use crate::models::*;

const ANDROID_PUBLISHER_BASE: &str = "https://androidpublisher.googleapis.com";
const ANDROID_PUBLISHER_SCOPE: &str = "https://www.googleapis.com/auth/androidpublisher";

/// Verification capability consumed by the relay.
///
/// The relay only needs "look up this purchase token"; keeping it behind a
/// trait lets tests substitute a canned verifier without network access.
#[async_trait]
pub trait SubscriptionVerifier: Send + Sync {
    async fn verify_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> Result<SubscriptionPurchase, PlayError>;
}

/// Google Play Developer API Client
///
/// Verifies subscription purchases via `purchases.subscriptions.get`.
/// Manages OAuth2 token generation from a service account key, with caching.
#[derive(Debug)]
pub struct PlayClient {
    credentials: Arc<ServiceAccountKey>,
    api_base: String,
    token_cache: Arc<Mutex<Option<TokenCache>>>,
    http_client: reqwest::Client,
}

impl PlayClient {
    /// Create a new client from a parsed service account key.
    pub fn new(credentials: ServiceAccountKey) -> Self {
        Self {
            credentials: Arc::new(credentials),
            api_base: ANDROID_PUBLISHER_BASE.to_string(),
            token_cache: Arc::new(Mutex::new(None)),
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a client from the raw service account key JSON.
    pub fn from_json_key(json_key: &str) -> Result<Self, PlayError> {
        let credentials: ServiceAccountKey = serde_json::from_str(json_key)
            .map_err(|e| PlayError::KeyParseError(e.to_string()))?;
        Ok(Self::new(credentials))
    }

    /// Point the client at alternate endpoints. Used by tests to target a
    /// mock server; `token_uri` replaces the one from the key file.
    pub fn with_endpoints(mut self, api_base: String, token_uri: String) -> Self {
        self.api_base = api_base;
        let mut credentials = (*self.credentials).clone();
        credentials.token_uri = token_uri;
        self.credentials = Arc::new(credentials);
        self
    }

    /// Get access token from service account (with caching)
    pub async fn get_access_token(&self) -> Result<String, PlayError> {
        // Reuse the cached token while it is valid for at least 60 more seconds
        {
            let cache = self.token_cache.lock().expect("Token cache lock poisoned");
            if let Some(cached) = cache.as_ref() {
                let now = Utc::now().timestamp();
                if cached.expires_at > now + 60 {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        // Generate new JWT and exchange for access token
        let now = Utc::now();
        let exp = (now + Duration::hours(1)).timestamp();
        let iat = now.timestamp();

        let claims = JwtClaims {
            iss: self.credentials.client_email.clone(),
            sub: self.credentials.client_email.clone(),
            scope: ANDROID_PUBLISHER_SCOPE.to_string(),
            aud: self.credentials.token_uri.clone(),
            exp,
            iat,
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())
            .map_err(|e| PlayError::KeyParseError(e.to_string()))?;

        let token = encode(&Header::new(jsonwebtoken::Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| PlayError::JwtEncodeError(e.to_string()))?;

        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", &token),
        ];

        let response = self
            .http_client
            .post(&self.credentials.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| PlayError::TokenError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlayError::TokenRequestFailed(response.status().to_string()));
        }

        let token_response: GoogleTokenResponse = response
            .json()
            .await
            .map_err(|e| PlayError::TokenParseError(e.to_string()))?;

        let expires_at = Utc::now().timestamp() + token_response.expires_in;
        {
            let mut cache = self.token_cache.lock().expect("Token cache lock poisoned");
            *cache = Some(TokenCache {
                access_token: token_response.access_token.clone(),
                expires_at,
            });
        }

        Ok(token_response.access_token)
    }
}

#[async_trait]
impl SubscriptionVerifier for PlayClient {
    /// Look up a subscription purchase by its token.
    async fn verify_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> Result<SubscriptionPurchase, PlayError> {
        let access_token = self.get_access_token().await?;

        let url = format!(
            "{}/androidpublisher/v3/applications/{}/purchases/subscriptions/{}/tokens/{}",
            self.api_base, package_name, subscription_id, purchase_token
        );

        tracing::debug!(%package_name, %subscription_id, "Verifying subscription purchase");

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| PlayError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().to_string();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PlayError::ApiError(status, error_text));
        }

        response
            .json::<SubscriptionPurchase>()
            .await
            .map_err(|e| PlayError::ResponseParseError(e.to_string()))
    }
}
