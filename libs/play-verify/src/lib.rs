/// Play Verify Shared Library
///
/// This library provides a Google Play Developer API client for verifying
/// subscription purchases reported by real-time developer notifications.
///
/// It handles:
/// - OAuth2 token generation using Google service accounts
/// - Token caching with automatic refresh
/// - `purchases.subscriptions.get` lookups by purchase token
/// - A `SubscriptionVerifier` trait so callers can substitute the client in tests

pub mod client;
pub mod models;
pub mod errors;

pub use client::{PlayClient, SubscriptionVerifier};
pub use models::{ServiceAccountKey, SubscriptionPurchase};
pub use errors::PlayError;
