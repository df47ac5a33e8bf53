//! # Utility Modules
//!
//! Logging setup and codec metrics.
//!
//! ## Components
//! - **Logging**: `tracing-subscriber` installation from [`crate::config::LoggingConfig`]
//! - **Metrics**: Thread-safe observability counters and a drop-based timer

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::{global_metrics, Metrics, MetricsSnapshot, Timer};
