use crate::config::logging::secure_log;
use crate::config::parameter;
use crate::response::app_response::DataResponse;
use crate::state::health_state::HealthState;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub configured_parameters: usize,
    pub storage: StorageHealth,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct StorageHealth {
    pub backend: String,
    pub status: String,
    pub response_time_ms: Option<u128>,
}

static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

pub fn init_start_time() {
    START_TIME.set(Instant::now()).ok();
}

pub fn get_uptime_seconds() -> u64 {
    START_TIME.get().map(|start| start.elapsed().as_secs()).unwrap_or(0)
}

/// Liveness plus storage reachability. Answers 503 when storage is down.
pub async fn health_check(State(state): State<HealthState>) -> DataResponse<HealthStatus> {
    let storage = check_storage(&state).await;
    let healthy = storage.status == "healthy";

    let response = DataResponse::ok(HealthStatus {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_seconds: get_uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        configured_parameters: parameter::loaded_count(),
        storage,
    });

    if healthy {
        response
    } else {
        response.with_status(StatusCode::SERVICE_UNAVAILABLE)
    }
}

async fn check_storage(state: &HealthState) -> StorageHealth {
    let backend = state.backend.to_string();
    let Some(database) = &state.database else {
        return StorageHealth {
            backend,
            status: "healthy".to_string(),
            response_time_ms: None,
        };
    };

    let start = Instant::now();
    match database.ping().await {
        Ok(()) => StorageHealth {
            backend,
            status: "healthy".to_string(),
            response_time_ms: Some(start.elapsed().as_millis()),
        },
        Err(e) => {
            secure_log::secure_error!("Database health check failed", e);
            StorageHealth {
                backend,
                status: "unhealthy".to_string(),
                response_time_ms: None,
            }
        }
    }
}
