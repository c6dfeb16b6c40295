//! ESP32 telemetry relay library.

pub mod advisory;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod telemetry;
pub mod weather;

pub use config::schema::RelayConfig;
pub use error::RelayError;
pub use http::RelayServer;
pub use lifecycle::Shutdown;
