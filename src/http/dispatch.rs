//! Request dispatch.
//!
//! # Responsibilities
//! - Hold the routing table of boxed handlers plus the 404/405 fallbacks
//! - Resolve each request and build its [`RequestContext`]
//! - Invoke exactly one handler, or write the terminal 404/405
//! - Emit the access log line and dispatch metrics
//!
//! # Design Decisions
//! - A hit under the requested method always wins over 405/404
//! - The dispatcher holds no mutable state; `&self` is shared across tasks
//! - Handler failures are the handler's business: whatever it returns is sent

use std::time::Instant;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;

use crate::http::context::RequestContext;
use crate::http::handler::{BoxHandler, Handler};
use crate::http::query::QueryParams;
use crate::http::response;
use crate::http::X_REQUEST_ID;
use crate::observability::metrics;
use crate::routing::{Router, RouterOptions, RoutingError};

/// How a request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    NotFound,
    MethodNotAllowed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Matched => "matched",
            Outcome::NotFound => "not_found",
            Outcome::MethodNotAllowed => "method_not_allowed",
        }
    }
}

/// Routes requests to registered handlers.
#[derive(Debug, Default)]
pub struct Dispatcher {
    router: Router<BoxHandler>,
    not_found: Option<BoxHandler>,
    method_not_allowed: Option<BoxHandler>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RouterOptions) -> Self {
        Self {
            router: Router::with_options(options),
            not_found: None,
            method_not_allowed: None,
        }
    }

    /// Register `handler` for `method` and `pattern`.
    pub fn route(&mut self, method: Method, pattern: &str, handler: impl Handler) -> &mut Self {
        self.router.route(method, pattern, BoxHandler::new(handler));
        self
    }

    pub fn get(&mut self, pattern: &str, handler: impl Handler) -> &mut Self {
        self.route(Method::GET, pattern, handler)
    }

    pub fn post(&mut self, pattern: &str, handler: impl Handler) -> &mut Self {
        self.route(Method::POST, pattern, handler)
    }

    pub fn put(&mut self, pattern: &str, handler: impl Handler) -> &mut Self {
        self.route(Method::PUT, pattern, handler)
    }

    pub fn patch(&mut self, pattern: &str, handler: impl Handler) -> &mut Self {
        self.route(Method::PATCH, pattern, handler)
    }

    pub fn delete(&mut self, pattern: &str, handler: impl Handler) -> &mut Self {
        self.route(Method::DELETE, pattern, handler)
    }

    /// Replace the default 404 responder.
    pub fn not_found(&mut self, handler: impl Handler) -> &mut Self {
        self.not_found = Some(BoxHandler::new(handler));
        self
    }

    /// Replace the default 405 responder.
    pub fn method_not_allowed(&mut self, handler: impl Handler) -> &mut Self {
        self.method_not_allowed = Some(BoxHandler::new(handler));
        self
    }

    pub fn router(&self) -> &Router<BoxHandler> {
        &self.router
    }

    /// Dispatch a full transport request.
    pub async fn dispatch(&self, request: Request<Body>) -> Response {
        let started = Instant::now();
        let (parts, body) = request.into_parts();
        let path = parts.uri.path();
        let query = parts.uri.query().unwrap_or_default();
        let request_id = parts
            .headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let ctx = RequestContext::builder(parts.method.clone(), path)
            .query(QueryParams::parse(query))
            .headers(parts.headers)
            .body(body);

        let (outcome, pattern, response) = match self.router.resolve(&parts.method, path) {
            Ok(hit) => {
                let ctx = ctx
                    .pattern(hit.pattern)
                    .params(hit.params)
                    .filename(hit.filename)
                    .build();
                let response = hit.handler.call(ctx).await;
                (Outcome::Matched, Some(hit.pattern), response)
            }
            Err(RoutingError::NoRouteForPath { .. }) => {
                let response = match &self.not_found {
                    Some(handler) => handler.call(ctx.build()).await,
                    None => response::not_found(),
                };
                (Outcome::NotFound, None, response)
            }
            Err(RoutingError::MethodNotAllowed { allowed, .. }) => {
                let response = match &self.method_not_allowed {
                    Some(handler) => handler.call(ctx.build()).await,
                    None => response::method_not_allowed(&allowed),
                };
                (Outcome::MethodNotAllowed, None, response)
            }
        };

        let status = response.status();
        tracing::info!(
            request_id = request_id.as_deref().unwrap_or("-"),
            method = %parts.method,
            path = %path,
            route = pattern.unwrap_or("-"),
            status = status.as_u16(),
            status_text = status.canonical_reason().unwrap_or(""),
            latency_ms = started.elapsed().as_millis() as u64,
            "Request dispatched"
        );
        metrics::record_dispatch(&parts.method, outcome.as_str(), started);

        response
    }

    /// Dispatch a bodiless request given a method and a raw `path?query`.
    pub async fn handle(&self, method: Method, uri: &str) -> Response {
        match Request::builder().method(method).uri(uri).body(Body::empty()) {
            Ok(request) => self.dispatch(request).await,
            Err(e) => {
                tracing::debug!(uri = %uri, error = %e, "Rejecting unparsable request target");
                response::status_response(StatusCode::BAD_REQUEST)
            }
        }
    }
}
