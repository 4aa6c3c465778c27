//! Middleware stack for the gateway.
//!
//! - `auth` - admin Basic authentication with constant-time credential
//!   comparison.
//! - `rate_limit` - per-identity sliding-window limiter in front of the
//!   submission endpoint.
//! - `cors` - tower-http CORS wrapper.

pub mod auth;
pub mod cors;
pub mod rate_limit;

pub use auth::{constant_time_compare, AdminAuthLayer};
pub use cors::create_cors_layer;
pub use rate_limit::{cleanup_task, RateLimitLayer, SubmissionLimiter};
