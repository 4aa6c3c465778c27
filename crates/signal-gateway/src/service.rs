//! Gateway service: route assembly and server lifecycle.
//!
//! Public surface: read the approved list, submit a signal. Admin surface
//! (behind Basic auth): pending list, dashboard, approve, reject. The
//! submission route alone sits behind the rate limiter.

use crate::config::GatewayConfig;
use crate::error::{ApiError, GatewayError};
use crate::middleware::{cleanup_task, create_cors_layer, AdminAuthLayer, RateLimitLayer};
use crate::view;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use signal_moderation::{ModerationEngine, SignalRecord};
use signal_store::FileStore;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Interval between sweeps for idle rate limit entries.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<ModerationEngine>,
}

/// Build the full route tree.
///
/// Exposed separately from [`GatewayService`] so tests can drive the router
/// directly without binding a socket.
pub fn build_router(
    config: &GatewayConfig,
    engine: Arc<ModerationEngine>,
    rate_limit: RateLimitLayer,
) -> Router {
    let state = AppState { engine };

    let admin_routes = Router::new()
        .route("/admin", get(admin_view))
        .route("/admin/pending", get(list_pending))
        .route("/admin/approve", post(approve_signal))
        .route("/admin/reject", post(reject_signal))
        .layer(AdminAuthLayer::new(config.admin.clone()));

    // The limiter wraps the submission method only; reads stay unmetered.
    let signals = get(list_signals).merge(post(submit_signal).layer(rate_limit));

    Router::new()
        .route("/signals", signals)
        .merge(admin_routes)
        .route("/health", get(health_check))
        .layer(create_cors_layer(&config.cors))
        .with_state(state)
}

/// GET /signals - the approved list, the only collection readable without
/// credentials.
async fn list_signals(State(state): State<AppState>) -> Json<Vec<SignalRecord>> {
    Json(state.engine.list_approved())
}

/// POST /signals - validate and enqueue a submission.
async fn submit_signal(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.engine.submit(&payload)?;
    info!(id = %id, "Signal submission accepted");
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "id": id }))))
}

/// GET /admin/pending - the moderation queue.
async fn list_pending(State(state): State<AppState>) -> Json<Vec<SignalRecord>> {
    Json(state.engine.list_pending())
}

/// GET /admin - server-rendered dashboard.
async fn admin_view(State(state): State<AppState>) -> Html<String> {
    let pending = state.engine.list_pending();
    let approved_count = state.engine.list_approved().len();
    Html(view::render_admin_view(&pending, approved_count))
}

/// POST /admin/approve - move a pending signal to the approved list.
async fn approve_signal(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = extract_id(&body)?;
    state.engine.approve(id)?;
    info!(id = %id, "Signal approved");
    Ok(Json(json!({ "success": true })))
}

/// POST /admin/reject - discard a pending signal.
async fn reject_signal(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = extract_id(&body)?;
    state.engine.reject(id)?;
    info!(id = %id, "Signal rejected");
    Ok(Json(json!({ "success": true })))
}

/// GET /health - liveness probe.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Pull the target id out of a moderation action body.
fn extract_id(body: &Value) -> Result<&str, ApiError> {
    body.get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(ApiError::missing_id)
}

/// The gateway server: owns the engine and serves the route tree.
pub struct GatewayService {
    config: GatewayConfig,
    engine: Arc<ModerationEngine>,
}

impl GatewayService {
    /// Create a gateway from validated configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        config.validate()?;

        let store = FileStore::new(config.storage.data_dir.clone());
        let engine = Arc::new(ModerationEngine::new(store));

        Ok(Self { config, engine })
    }

    /// Bind and serve until the task is cancelled or the listener fails.
    pub async fn serve(self) -> Result<(), GatewayError> {
        let rate_limit = RateLimitLayer::new(self.config.rate_limit.clone());
        tokio::spawn(cleanup_task(rate_limit.limiter(), CLEANUP_INTERVAL));

        let router = build_router(&self.config, Arc::clone(&self.engine), rate_limit);

        let addr = self.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(addr = %addr, "Gateway listening");

        // Connect info feeds the rate limiter's direct-address fallback.
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;

        Ok(())
    }
}
