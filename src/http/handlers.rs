//! HTTP handlers for the REST API.
//!
//! AI endpoints read the body as raw bytes so that malformed JSON still
//! produces a JSON `{error}` response instead of axum's plain-text rejection.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::Value;

use super::dto::{availability, impact_examples, HealthResponse, ImpactExample};
use super::error::AppError;
use super::state::AppState;
use crate::neo::NeoResponse;
use crate::wire::{InterceptPlan, NarrativeResponse};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

type Passthrough = Result<(StatusCode, Json<Value>), AppError>;

fn passthrough(resp: NeoResponse) -> (StatusCode, Json<Value>) {
    let status = StatusCode::from_u16(resp.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(resp.body))
}

// =============================================================================
// NEO pass-through
// =============================================================================

/// GET /api/home/stats
pub async fn neo_stats(State(state): State<AppState>) -> Passthrough {
    Ok(passthrough(state.neo.stats().await?))
}

/// GET /api/home/today_stats
pub async fn neo_today(State(state): State<AppState>) -> Passthrough {
    Ok(passthrough(state.neo.today_feed().await?))
}

/// GET /api/neo/{id}
pub async fn neo_lookup(State(state): State<AppState>, Path(id): Path<String>) -> Passthrough {
    Ok(passthrough(state.neo.lookup(&id).await?))
}

/// GET /api/neo/browse
pub async fn neo_browse(State(state): State<AppState>) -> Passthrough {
    Ok(passthrough(state.neo.browse().await?))
}

// =============================================================================
// AI
// =============================================================================

/// POST /api/ai/predict-impact
///
/// Expects `{"lat": number, "lon": number, "mass_kg": number}`.
pub async fn predict_impact(State(state): State<AppState>, body: Bytes) -> HandlerResult<NarrativeResponse> {
    let body: Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest("No JSON data provided".to_string()))?;
    Ok(Json(state.pipeline.predict_impact(&body).await?))
}

/// POST /api/ai/plan-intercept
///
/// Every field is optional; an empty body is treated as `{}`.
pub async fn plan_intercept(State(state): State<AppState>, body: Bytes) -> HandlerResult<InterceptPlan> {
    let body: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?
    };
    Ok(Json(state.pipeline.plan_intercept(&body).await?))
}

/// GET /api/ai/impact-examples
pub async fn get_impact_examples() -> Json<std::collections::BTreeMap<&'static str, ImpactExample>> {
    Json(impact_examples())
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /api/health
///
/// Reports which upstream credentials are configured. Always 200.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        nasa_api: availability(state.nasa_key_configured),
        ai_api: availability(state.ai_available),
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
