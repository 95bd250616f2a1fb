//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Own one route tree per HTTP method
//! - Resolve (method, path) to a matched route
//! - Tell "no route at this path" apart from "wrong method for this path"
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Method tokens are case-insensitive and normalized to upper case
//! - The requested method is always tried before any other tree is probed
//! - Explicit error variants rather than a silent default handler

use std::collections::HashMap;

use axum::http::{Method, StatusCode};

use crate::routing::matcher::split_segments;
use crate::routing::params::Params;
use crate::routing::tree::{RouteTree, SiblingOrder};

/// Options fixed when a router is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterOptions {
    /// Compare literal segments and wildcard extensions exactly.
    pub case_sensitive: bool,
    pub sibling_order: SiblingOrder,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            sibling_order: SiblingOrder::Priority,
        }
    }
}

/// Why a request could not be routed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    /// No tree, under any method, has a route for the path.
    #[error("no route for path {path}")]
    NoRouteForPath { path: String },

    /// The path is routable, just not with the requested method.
    #[error("method {method} not allowed for path {path}")]
    MethodNotAllowed {
        method: Method,
        path: String,
        /// Methods whose trees match the path, sorted.
        allowed: Vec<Method>,
    },
}

impl RoutingError {
    /// Status code the failure is surfaced as.
    pub fn status(&self) -> StatusCode {
        match self {
            RoutingError::NoRouteForPath { .. } => StatusCode::NOT_FOUND,
            RoutingError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

/// A successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'r, H> {
    pub handler: &'r H,
    /// Pattern the route was registered with, normalized.
    pub pattern: &'r str,
    pub params: Params,
    /// Final path segment, set only when a wildcard route matched.
    pub filename: Option<String>,
}

/// Upper-case a method token: `get`, `Get` and `GET` are the same method.
pub(crate) fn canonical(method: &Method) -> Method {
    let token = method.as_str();
    if token.bytes().any(|b| b.is_ascii_lowercase()) {
        Method::from_bytes(token.to_ascii_uppercase().as_bytes()).unwrap_or_else(|_| method.clone())
    } else {
        method.clone()
    }
}

/// Routing table: one [`RouteTree`] per method.
#[derive(Debug)]
pub struct Router<H> {
    trees: HashMap<Method, RouteTree<H>>,
    options: RouterOptions,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self::with_options(RouterOptions::default())
    }

    pub fn with_options(options: RouterOptions) -> Self {
        Self {
            trees: HashMap::new(),
            options,
        }
    }

    pub fn options(&self) -> RouterOptions {
        self.options
    }

    /// Register `handler` for `method` and `pattern`.
    ///
    /// Never fails. Registering the same method and pattern again replaces
    /// the earlier handler.
    pub fn route(&mut self, method: Method, pattern: &str, handler: H) -> &mut Self {
        let method = canonical(&method);
        let options = self.options;
        let tree = self
            .trees
            .entry(method.clone())
            .or_insert_with(|| RouteTree::new(options.case_sensitive, options.sibling_order));

        let replaced = tree.insert(pattern, handler).is_some();
        tracing::debug!(method = %method, pattern = %pattern, replaced, "Route registered");
        self
    }

    pub fn get(&mut self, pattern: &str, handler: H) -> &mut Self {
        self.route(Method::GET, pattern, handler)
    }

    pub fn post(&mut self, pattern: &str, handler: H) -> &mut Self {
        self.route(Method::POST, pattern, handler)
    }

    pub fn put(&mut self, pattern: &str, handler: H) -> &mut Self {
        self.route(Method::PUT, pattern, handler)
    }

    pub fn patch(&mut self, pattern: &str, handler: H) -> &mut Self {
        self.route(Method::PATCH, pattern, handler)
    }

    pub fn delete(&mut self, pattern: &str, handler: H) -> &mut Self {
        self.route(Method::DELETE, pattern, handler)
    }

    /// Resolve a request.
    ///
    /// `path` must not carry the query string.
    pub fn resolve(&self, method: &Method, path: &str) -> Result<RouteMatch<'_, H>, RoutingError> {
        let method = canonical(method);
        let segments = split_segments(path);

        if let Some(endpoint) = self.trees.get(&method).and_then(|tree| tree.find(&segments)) {
            let filename = if endpoint.is_wildcard() {
                segments.last().map(|s| s.to_string())
            } else {
                None
            };
            return Ok(RouteMatch {
                handler: endpoint.handler(),
                pattern: endpoint.pattern(),
                params: endpoint.bind(&segments),
                filename,
            });
        }

        let allowed = self.allowed_methods(&method, &segments);
        if allowed.is_empty() {
            Err(RoutingError::NoRouteForPath {
                path: path.to_string(),
            })
        } else {
            Err(RoutingError::MethodNotAllowed {
                method,
                path: path.to_string(),
                allowed,
            })
        }
    }

    /// Registered (method, pattern) pairs, sorted.
    pub fn routes(&self) -> Vec<(Method, String)> {
        let mut routes: Vec<(Method, String)> = self
            .trees
            .iter()
            .flat_map(|(method, tree)| {
                tree.endpoints()
                    .map(move |e| (method.clone(), e.pattern().to_string()))
            })
            .collect();
        routes.sort_by(|a, b| (a.1.as_str(), a.0.as_str()).cmp(&(b.1.as_str(), b.0.as_str())));
        routes
    }

    /// Number of registered routes across all methods.
    pub fn len(&self) -> usize {
        self.trees.values().map(RouteTree::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn allowed_methods(&self, requested: &Method, segments: &[&str]) -> Vec<Method> {
        let mut allowed: Vec<Method> = self
            .trees
            .iter()
            .filter(|(method, _)| *method != requested)
            .filter(|(_, tree)| tree.find(segments).is_some())
            .map(|(method, _)| method.clone())
            .collect();
        allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        allowed
    }
}
