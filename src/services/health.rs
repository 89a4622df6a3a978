use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::database::connection::DatabaseManager;

/// Payload of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub version: String,
    pub uptime_seconds: i64,
    pub database_ok: bool,
    pub database_latency_ms: u64,
    pub pool_connections: u32,
}

#[derive(Clone)]
struct HealthState {
    db: Arc<DatabaseManager>,
    started_at: DateTime<Utc>,
}

/// Operational HTTP surface: `/health` runs a database round trip and
/// reports pool state; `/health/live` only proves the process is serving.
pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        let state = HealthState {
            db,
            started_at: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_report))
            .route("/health/live", get(liveness))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        Self { router }
    }
}

async fn health_report(
    State(state): State<HealthState>,
) -> Result<Json<HealthReport>, StatusCode> {
    let probe_started = std::time::Instant::now();
    let database_ok = sqlx::query("SELECT 1")
        .fetch_one(&state.db.pool)
        .await
        .is_ok();
    let database_latency_ms = probe_started.elapsed().as_millis() as u64;

    let report = HealthReport {
        status: if database_ok { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: Utc::now()
            .signed_duration_since(state.started_at)
            .num_seconds(),
        database_ok,
        database_latency_ms,
        pool_connections: state.db.pool.size(),
    };

    if database_ok {
        Ok(Json(report))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

async fn liveness() -> Json<&'static str> {
    Json("alive")
}
