//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and background tasks produce:
//!     → logging.rs (structured tracing events, request-id spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
