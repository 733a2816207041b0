pub mod forwarder;
pub mod relay;

pub use forwarder::Forwarder;
pub use relay::{NotificationRelay, RoutingTarget};
