//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing and dispatch produce:
//!     → logging.rs (structured log events, access log)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the transport into the access log
//! - Metrics are cheap (atomic increments)
//! - The routing core itself only logs registration at debug level

pub mod logging;
pub mod metrics;
