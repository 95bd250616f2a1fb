//! Route handlers.
//!
//! A handler is any `Fn(RequestContext) -> impl Future<Output = impl
//! IntoResponse>`. The returned response is what the transport writes back;
//! there is no separate mutable response object.

use std::future::Future;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

use crate::http::context::RequestContext;

/// An async request handler.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, ctx: RequestContext) -> BoxFuture<'static, Response>;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn call(&self, ctx: RequestContext) -> BoxFuture<'static, Response> {
        let fut = (self)(ctx);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// Type-erased, cheaply clonable handler as stored in the route trees.
#[derive(Clone)]
pub struct BoxHandler(Arc<dyn Handler>);

impl BoxHandler {
    pub fn new<H: Handler>(handler: H) -> Self {
        Self(Arc::new(handler))
    }

    pub fn call(&self, ctx: RequestContext) -> BoxFuture<'static, Response> {
        self.0.call(ctx)
    }
}

impl std::fmt::Debug for BoxHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BoxHandler")
    }
}
