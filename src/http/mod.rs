//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, timeout, trace layers)
//!     → dispatch.rs (resolve route, build context)
//!     → context.rs + query.rs (params, query pairs, filename)
//!     → handler.rs (invoke the route's handler)
//!     → response.rs (404 / 405 when nothing matched)
//!     → Send to client
//! ```

pub mod context;
pub mod dispatch;
pub mod handler;
pub mod query;
pub mod response;
pub mod server;

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

pub use context::RequestContext;
pub use dispatch::Dispatcher;
pub use handler::{BoxHandler, Handler};
pub use query::QueryParams;
pub use server::HttpServer;
