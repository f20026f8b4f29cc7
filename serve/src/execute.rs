//! Handle `POST /execute_agent`: dispatch one submission to its executor.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::app::AppState;
use crate::dispatch::dispatch;
use crate::history;
use crate::registry::Fields;

/// Wire request: the agent identifier plus the flattened string fields the
/// client submitted alongside it.
#[derive(Debug, Deserialize)]
pub(crate) struct AgentRequest {
    agent: String,
    #[serde(flatten)]
    fields: Fields,
}

/// Failure response: a status plus a human-readable `detail`, the shape the
/// client renders verbatim.
pub(crate) struct ApiError {
    status: StatusCode,
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub(crate) async fn execute_agent(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AgentRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = run_execute(&state, req).await;
    // Once-mode exits only after a submission was actually answered.
    state.signal_done();
    result
}

async fn run_execute(state: &AppState, req: AgentRequest) -> Result<Json<Value>, ApiError> {
    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        agent = %req.agent,
        fields = req.fields.len(),
        "execute_agent"
    );

    let output = dispatch(&state.registry, &req.agent, &req.fields)
        .await
        .map_err(|e| {
            tracing::warn!(%request_id, agent = %req.agent, error = %e, "dispatch failed");
            ApiError {
                status: StatusCode::from_u16(e.status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                detail: e.to_string(),
            }
        })?;

    if let Some(dir) = &state.history_dir {
        // History is best effort: a persistence failure never fails the request.
        if let Err(e) = history::save_report(dir, &req.agent, &req.fields, &output) {
            tracing::warn!(%request_id, error = %e, "history save failed");
        }
    }

    tracing::info!(%request_id, agent = %req.agent, output_len = output.len(), "agent done");
    Ok(Json(json!({ "output": output })))
}
