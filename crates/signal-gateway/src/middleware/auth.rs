//! Admin authentication middleware.
//!
//! Gates every moderation-mutating and pending-listing route behind a
//! Basic credential pair. All failure modes (missing header, wrong scheme,
//! malformed base64, missing colon, value mismatch) produce the identical
//! 401 response so nothing distinguishes one rejection from another.

use crate::config::AdminConfig;
use crate::error::ApiError;
use axum::{
    body::Body,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::warn;

/// Realm advertised on rejection so interactive clients can retry.
const REALM: &str = "signalboard-admin";

/// Admin authentication layer.
#[derive(Clone)]
pub struct AdminAuthLayer {
    admin: Arc<AdminConfig>,
}

impl AdminAuthLayer {
    pub fn new(admin: AdminConfig) -> Self {
        Self {
            admin: Arc::new(admin),
        }
    }
}

impl<S> Layer<S> for AdminAuthLayer {
    type Service = AdminAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AdminAuthService {
            inner,
            admin: Arc::clone(&self.admin),
        }
    }
}

/// Admin authentication service.
#[derive(Clone)]
pub struct AdminAuthService<S> {
    inner: S,
    admin: Arc<AdminConfig>,
}

impl<S> Service<Request<Body>> for AdminAuthService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let admin = Arc::clone(&self.admin);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let authorized = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .map(|h| check_credential(h, &admin))
                .unwrap_or(false);

            if !authorized {
                warn!(path = %req.uri().path(), "Admin authentication failed");
                return Ok(unauthorized_response());
            }

            inner.call(req).await
        })
    }
}

/// Check a Basic credential header against the configured admin pair.
///
/// Identity and secret are both compared in constant time and the results
/// combined before branching, so a matching identity leaks nothing.
fn check_credential(header_value: &str, admin: &AdminConfig) -> bool {
    let Some(encoded) = header_value.strip_prefix("Basic ") else {
        return false;
    };
    let Ok(decoded) = BASE64.decode(encoded.trim()) else {
        return false;
    };
    let Ok(pair) = String::from_utf8(decoded) else {
        return false;
    };
    let Some((identity, secret)) = pair.split_once(':') else {
        return false;
    };

    let identity_ok = constant_time_compare(identity, &admin.identity);
    let secret_ok = constant_time_compare(secret, &admin.secret);
    identity_ok & secret_ok
}

/// Constant-time string comparison to prevent timing attacks.
///
/// Takes the same amount of time regardless of how many leading characters
/// match. Uses `subtle::ConstantTimeEq`; a naive XOR loop can still be
/// optimized by the compiler.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;

    // Pad both sides to the max length so unequal lengths do not short-
    // circuit the byte comparison. Different pad bytes guarantee a mismatch.
    let max_len = std::cmp::max(a.len(), b.len());

    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];
    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);

    (lengths_equal & contents_equal).into()
}

/// The uniform 401 response, advertising the expected scheme.
fn unauthorized_response() -> Response {
    let mut response = ApiError::unauthorized().into_response();
    response.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        format!("Basic realm=\"{REALM}\"")
            .parse()
            .unwrap_or_else(|_| header::HeaderValue::from_static("Basic")),
    );
    response
}
