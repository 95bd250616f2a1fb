//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     (method, "/users/:id", handler)
//!     → router.rs (pick the method's tree)
//!     → tree.rs (walk/extend nodes, bump priorities, re-sort siblings)
//!     → matcher.rs (classify each segment)
//!
//! Incoming Request (method, path):
//!     → router.rs (lookup in the method's tree)
//!     → tree.rs (depth-first descent over ordered siblings)
//!     → Return: RouteMatch, or probe other trees for 405, else 404
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - Sibling order is by priority unless specificity ordering is configured

pub mod matcher;
pub mod params;
pub mod router;
pub mod tree;

pub use matcher::Segment;
pub use params::Params;
pub use router::{RouteMatch, Router, RouterOptions, RoutingError};
pub use tree::{RouteTree, SiblingOrder};
