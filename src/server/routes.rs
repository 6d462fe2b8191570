//! HTTP route handlers for the action server.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

use crate::actions::{ActionRegistry, Tracker};
use crate::kernel::message::BotResponse;
use crate::kernel::slots::SlotEvent;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionInfo {
    pub name: String,
}

pub async fn list_actions(State(registry): State<Arc<ActionRegistry>>) -> Json<Vec<ActionInfo>> {
    Json(
        registry
            .names()
            .into_iter()
            .map(|name| ActionInfo { name: name.to_string() })
            .collect(),
    )
}

/// Webhook request body sent by the orchestrator.
#[derive(Debug, Deserialize)]
pub struct ActionCall {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: Tracker,
    #[serde(default)]
    pub domain: Option<Value>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    pub events: Vec<SlotEvent>,
    pub responses: Vec<BotResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionErrorResponse {
    pub error: String,
    pub action_name: String,
}

impl IntoResponse for ActionErrorResponse {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Json(self)).into_response()
    }
}

/// Run the requested action for one conversation turn.
pub async fn webhook(
    State(registry): State<Arc<ActionRegistry>>,
    Json(call): Json<ActionCall>,
) -> Result<Json<ActionResponse>, ActionErrorResponse> {
    let sender = call
        .sender_id
        .as_deref()
        .or(call.tracker.sender_id.as_deref())
        .unwrap_or("unknown")
        .to_string();
    let span = info_span!(
        "turn",
        turn_id = %Uuid::new_v4(),
        action = %call.next_action,
        sender = %sender
    );

    async move {
        match registry.dispatch(&call.next_action, &call.tracker).await {
            Ok(outcome) => Ok(Json(ActionResponse {
                events: outcome.events(),
                responses: outcome.responses(),
            })),
            Err(e) => {
                warn!(error = %e, "Rejected action call");
                Err(ActionErrorResponse {
                    error: e.to_string(),
                    action_name: call.next_action.clone(),
                })
            }
        }
    }
    .instrument(span)
    .await
}
