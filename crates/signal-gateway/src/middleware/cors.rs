//! CORS middleware.
//!
//! Wrapper around tower-http CORS with gateway configuration. The browser
//! clients of the public surface (read + submit) live on other origins.

use crate::config::CorsConfig;
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer as TowerCorsLayer};

/// Create a CORS layer from gateway config.
pub fn create_cors_layer(config: &CorsConfig) -> TowerCorsLayer {
    if !config.enabled {
        return TowerCorsLayer::very_permissive();
    }

    let mut cors = TowerCorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}
