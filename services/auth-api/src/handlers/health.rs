//! Liveness and readiness probes

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::time::Instant;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
}

/// Readiness payload. The only dependency that can hold this service back
/// is the store behind logins and refreshes, so that is all we probe.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub store: StoreProbe,
}

#[derive(Debug, Serialize)]
pub struct StoreProbe {
    pub reachable: bool,
    pub latency_ms: u64,
}

/// GET /health - static liveness, no dependencies
pub async fn health() -> Json<ProbeResponse> {
    Json(ProbeResponse { status: "healthy" })
}

/// GET /live - Kubernetes liveness alias
pub async fn live() -> Json<ProbeResponse> {
    Json(ProbeResponse { status: "alive" })
}

/// GET /ready
///
/// Round-trips the store. With it unreachable every login and refresh
/// would fail closed, so the pod reports 503 and drops out of rotation
/// rather than absorbing traffic it cannot serve.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let started = Instant::now();
    let reachable = sqlx::query("SELECT 1").fetch_one(&*state.pool).await.is_ok();

    let store = StoreProbe {
        reachable,
        latency_ms: started.elapsed().as_millis() as u64,
    };

    if store.reachable {
        (StatusCode::OK, Json(ReadyResponse { status: "ready", store }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyResponse {
                status: "degraded",
                store,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_payload_reports_store_state() {
        let body = serde_json::to_value(ReadyResponse {
            status: "degraded",
            store: StoreProbe {
                reachable: false,
                latency_ms: 12,
            },
        })
        .unwrap();

        assert_eq!(body["status"], "degraded");
        assert_eq!(body["store"]["reachable"], false);
        assert_eq!(body["store"]["latency_ms"], 12);
    }
}
