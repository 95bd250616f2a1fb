//! Trie-based HTTP request router.
//!
//! Routes are registered per method into a prefix tree over path segments
//! (literals, `:name` parameters, `*.ext` wildcards). At request time the
//! dispatcher resolves the route, builds a [`RequestContext`] and invokes the
//! handler, or answers 404 / 405.
//!
//! ```no_run
//! use trie_router::{Dispatcher, RequestContext};
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher
//!     .get("/ping", |_ctx: RequestContext| async { "pong" })
//!     .get("/users/:username", |ctx: RequestContext| async move {
//!         ctx.param("username").unwrap_or_default().to_string()
//!     });
//! ```

// Core subsystems
pub mod config;
pub mod error;
pub mod http;
pub mod routing;
pub mod site;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use error::Error;
pub use http::{Dispatcher, HttpServer, QueryParams, RequestContext};
pub use lifecycle::Shutdown;
pub use routing::{Params, Router, RouterOptions, RoutingError, SiblingOrder};
