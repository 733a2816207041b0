pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod handlers;

pub use config::Config;
pub use error::{RelayError, Result};
pub use services::*;
