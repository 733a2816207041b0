/// HTTP handlers for the relay service
pub mod pubsub;

pub use pubsub::register_routes;
