//! Per-request context handed to route handlers.
//!
//! # Responsibilities
//! - Carry the resolved path parameters and parsed query string
//! - Carry the matched filename for wildcard routes
//! - Give handlers access to headers and the unread body
//!
//! # Design Decisions
//! - Built once per request by the dispatcher, consumed by one handler
//! - Explicit value instead of properties bolted onto the transport request
//! - Body reading is left to the handler

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method};

use crate::http::query::QueryParams;
use crate::http::X_REQUEST_ID;
use crate::routing::Params;

/// Everything a handler learns about its request.
#[derive(Debug)]
pub struct RequestContext {
    method: Method,
    path: String,
    pattern: String,
    params: Params,
    query: QueryParams,
    filename: Option<String>,
    headers: HeaderMap,
    body: Body,
}

impl RequestContext {
    pub fn builder(method: Method, path: impl Into<String>) -> RequestContextBuilder {
        RequestContextBuilder {
            ctx: RequestContext {
                method,
                path: path.into(),
                pattern: String::new(),
                params: Params::new(),
                query: QueryParams::default(),
                filename: None,
                headers: HeaderMap::new(),
                body: Body::empty(),
            },
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path, without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Pattern of the route that matched, e.g. `/users/:id`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Shorthand for `params().get(name)`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Final path segment when a wildcard route matched.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Value of a header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Request id assigned by the transport.
    pub fn request_id(&self) -> Option<&str> {
        self.header(X_REQUEST_ID)
    }

    /// Take the body, leaving an empty one behind.
    pub fn take_body(&mut self) -> Body {
        std::mem::replace(&mut self.body, Body::empty())
    }

    /// Read the whole body, up to `limit` bytes.
    pub async fn read_body(&mut self, limit: usize) -> Result<Bytes, axum::Error> {
        axum::body::to_bytes(self.take_body(), limit).await
    }
}

/// Assembles a [`RequestContext`].
#[derive(Debug)]
pub struct RequestContextBuilder {
    ctx: RequestContext,
}

impl RequestContextBuilder {
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.ctx.pattern = pattern.into();
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.ctx.params = params;
        self
    }

    pub fn query(mut self, query: QueryParams) -> Self {
        self.ctx.query = query;
        self
    }

    pub fn filename(mut self, filename: Option<String>) -> Self {
        self.ctx.filename = filename;
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.ctx.headers = headers;
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.ctx.body = body.into();
        self
    }

    pub fn build(self) -> RequestContext {
        self.ctx
    }
}
