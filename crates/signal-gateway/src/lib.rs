//! HTTP facade for the signal moderation pipeline.
//!
//! Two surfaces share one port:
//!
//! ```text
//!   public                        admin (Basic auth)
//!   ──────                        ──────────────────
//!   GET  /signals                 GET  /admin            dashboard
//!   POST /signals  ──▶ limiter    GET  /admin/pending
//!   GET  /health                  POST /admin/approve
//!                                 POST /admin/reject
//! ```
//!
//! The facades hold no moderation logic of their own; every request is
//! translated into one [`signal_moderation::ModerationEngine`] call and the
//! result mapped onto an HTTP status. Cross-cutting concerns (credential
//! checking, rate limiting, CORS) live in the middleware stack.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod middleware;
pub mod service;
pub mod view;

pub use config::{AdminConfig, ConfigError, CorsConfig, GatewayConfig, RateLimitConfig};
pub use error::{ApiError, GatewayError};
pub use middleware::{AdminAuthLayer, RateLimitLayer, SubmissionLimiter};
pub use service::{build_router, GatewayService};
