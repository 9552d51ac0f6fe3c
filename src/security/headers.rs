//! Cross-origin isolation and Content-Security-Policy response headers.
//!
//! # Responsibilities
//! - Hold the fixed header set applied to every response
//! - Overwrite whatever the inner service set for those headers
//! - Leave status, body and all other headers untouched
//!
//! The three cross-origin headers opt the page into cross-origin isolation,
//! which the multi-threaded WebAssembly build needs for `SharedArrayBuffer`.
//! The policy allows the worker scripts, blob URLs and `eval` that build uses
//! and restricts external origins to an explicit list.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::header::{HeaderName, HeaderValue, CONTENT_SECURITY_POLICY};
use axum::http::{HeaderMap, Request, Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::config::SecurityConfig;

pub const CROSS_ORIGIN_OPENER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy");
pub const CROSS_ORIGIN_EMBEDDER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-embedder-policy");
pub const CROSS_ORIGIN_RESOURCE_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-resource-policy");

/// Policy served when the configuration does not override it.
pub const DEFAULT_CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
script-src 'self' 'unsafe-inline' 'unsafe-eval' blob: https://cdn.jsdelivr.net https://static.cloudflareinsights.com; \
worker-src 'self' blob: https://cdn.jsdelivr.net; \
connect-src 'self' blob: https://cdn.jsdelivr.net https://cloudflareinsights.com; \
style-src 'self' 'unsafe-inline' https://fonts.googleapis.com; \
font-src 'self' data: https://fonts.gstatic.com; \
img-src 'self' data: blob:; \
media-src 'self' blob:;";

/// The header set stamped onto every response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityHeaders {
    opener_policy: HeaderValue,
    embedder_policy: HeaderValue,
    resource_policy: HeaderValue,
    content_security_policy: HeaderValue,
}

impl SecurityHeaders {
    /// Build the set from configuration, substituting the policy override if present.
    ///
    /// An override that is not a valid header value falls back to the default
    /// policy; `validate_config` rejects such files before they get here.
    pub fn from_config(config: &SecurityConfig) -> Self {
        let mut headers = Self::default();
        if let Some(policy) = &config.content_security_policy {
            match HeaderValue::from_str(policy) {
                Ok(value) => headers.content_security_policy = value,
                Err(_) => tracing::warn!("Ignoring invalid Content-Security-Policy override"),
            }
        }
        headers
    }

    /// Iterate the header pairs in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (HeaderName, &HeaderValue)> {
        [
            (CROSS_ORIGIN_OPENER_POLICY, &self.opener_policy),
            (CROSS_ORIGIN_EMBEDDER_POLICY, &self.embedder_policy),
            (CROSS_ORIGIN_RESOURCE_POLICY, &self.resource_policy),
            (CONTENT_SECURITY_POLICY, &self.content_security_policy),
        ]
        .into_iter()
    }

    /// Set every header on `headers`, replacing existing values.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in self.iter() {
            headers.insert(name, value.clone());
        }
    }

    pub fn content_security_policy(&self) -> &HeaderValue {
        &self.content_security_policy
    }
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        Self {
            opener_policy: HeaderValue::from_static("same-origin"),
            embedder_policy: HeaderValue::from_static("require-corp"),
            resource_policy: HeaderValue::from_static("same-site"),
            content_security_policy: HeaderValue::from_static(DEFAULT_CONTENT_SECURITY_POLICY),
        }
    }
}

/// Layer that applies [`SecurityHeaders`] to every response of the wrapped service.
#[derive(Debug, Clone)]
pub struct SecurityHeadersLayer {
    headers: Arc<SecurityHeaders>,
}

impl SecurityHeadersLayer {
    pub fn new(headers: SecurityHeaders) -> Self {
        Self {
            headers: Arc::new(headers),
        }
    }
}

impl Default for SecurityHeadersLayer {
    fn default() -> Self {
        Self::new(SecurityHeaders::default())
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersService {
            inner,
            headers: self.headers.clone(),
        }
    }
}

/// Service produced by [`SecurityHeadersLayer`].
#[derive(Debug, Clone)]
pub struct SecurityHeadersService<S> {
    inner: S,
    headers: Arc<SecurityHeaders>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for SecurityHeadersService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: 'static,
    ReqBody: 'static,
    ResBody: 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let headers = self.headers.clone();
        let future = self.inner.call(request);

        Box::pin(async move {
            // an inner error has no response to decorate; pass it through
            let mut response = future.await?;
            headers.apply(response.headers_mut());
            Ok(response)
        })
    }
}
