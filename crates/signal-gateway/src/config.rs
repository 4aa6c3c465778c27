//! Gateway configuration with validation.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Main gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// HTTP server configuration.
    pub http: HttpConfig,
    /// Admin credentials guarding the moderation surface.
    pub admin: AdminConfig,
    /// Submission rate limiting.
    pub rate_limit: RateLimitConfig,
    /// Durable storage location.
    pub storage: StorageConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            admin: AdminConfig::default(),
            rate_limit: RateLimitConfig::default(),
            storage: StorageConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.identity.is_empty() || self.admin.secret.is_empty() {
            return Err(ConfigError::MissingAdminCredentials);
        }

        if self.rate_limit.max_submissions == 0 {
            return Err(ConfigError::InvalidRateLimit(
                "max_submissions cannot be 0".into(),
            ));
        }

        if self.rate_limit.window.is_zero() {
            return Err(ConfigError::InvalidRateLimit("window cannot be 0".into()));
        }

        Ok(())
    }

    /// Get the HTTP server bind address.
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bind address.
    pub host: IpAddr,
    /// Port (default: 8310).
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8310,
        }
    }
}

/// Admin credentials.
///
/// There is no usable default secret; deployments must configure one or
/// `validate()` refuses to start the gateway.
#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
    /// Admin identity (username half of the Basic pair).
    pub identity: String,
    /// Admin secret (password half of the Basic pair).
    pub secret: String,
}

/// Submission rate limiting: sliding window per client identity.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Accepted submissions allowed per identity inside the window.
    pub max_submissions: u32,
    /// Trailing window length.
    pub window: Duration,
    /// Enable rate limiting.
    pub enabled: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_submissions: 5,
            window: Duration::from_secs(10 * 60),
            enabled: true,
        }
    }
}

/// Durable storage location.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding `pending.json` and `approved.json`.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Enable CORS.
    pub enabled: bool,
    /// Allowed origins ("*" for all).
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Admin identity or secret is unset.
    #[error("admin credentials are not configured")]
    MissingAdminCredentials,
    /// Invalid rate limiting configuration.
    #[error("invalid rate limit: {0}")]
    InvalidRateLimit(String),
    /// General configuration error.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
