//! Request handlers. v1 takes the script as a path segment with no seeds;
//! v2 adds the seed bundle and usage accounting.

use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tagbridge_core::{build_seeds, GatewayError, RenderOutput};
use tagbridge_engine::SeedSet;

type ApiError = (StatusCode, Json<Value>);

#[derive(Serialize)]
pub struct ProcessResponse {
    pub body: String,
    pub actions: Map<String, Value>,
    pub extras: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses: Option<u64>,
}

#[derive(Deserialize, Default)]
pub struct V2Request {
    #[serde(default)]
    tagscript: Option<String>,
    #[serde(default)]
    seeds: Option<Value>,
}

pub async fn status() -> Json<Value> {
    Json(json!({ "Status": "Alive" }))
}

/// `GET /v1/process/:script` — script percent-decoded by the router, still
/// transport-encoded. No contextual seeds, no usage accounting.
pub async fn v1_process(
    State(state): State<AppState>,
    Path(script): Path<String>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let output = run_script(&state, script, SeedSet::new()).await?;
    Ok(Json(respond(output, None)))
}

/// `GET /v2/process/` — script and optional seed bundle from headers, falling
/// back to query parameters.
pub async fn v2_process_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let script = header_value(&headers, "tagscript")
        .or_else(|| query.get("tagscript").cloned())
        .ok_or_else(missing_script)?;
    let seeds = header_value(&headers, "seeds")
        .or_else(|| query.get("seeds").cloned())
        .map(|raw| parse_seed_bundle(&raw));
    process_contextual(state, script, seeds).await
}

/// `POST /v2/process/` — headers take precedence, then the JSON body.
pub async fn v2_process_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<V2Request>>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let script = header_value(&headers, "tagscript")
        .or(body.tagscript)
        .ok_or_else(missing_script)?;
    let seeds = header_value(&headers, "seeds")
        .map(|raw| parse_seed_bundle(&raw))
        .or(body.seeds);
    process_contextual(state, script, seeds).await
}

async fn process_contextual(
    state: AppState,
    script: String,
    seed_payload: Option<Value>,
) -> Result<Json<ProcessResponse>, ApiError> {
    // Accounting happens once per contextual request, before execution and
    // independent of its outcome. A store fault fails the whole request.
    let uses = state
        .counter
        .increment(&state.counter_key)
        .map_err(GatewayError::from)
        .map_err(internal)?;

    let seeds = build_seeds(&seed_payload.unwrap_or(Value::Null));
    let output = run_script(&state, script, seeds).await?;
    Ok(Json(respond(output, Some(uses))))
}

/// Script execution is synchronous and CPU-bound; run it off the async
/// workers.
async fn run_script(
    state: &AppState,
    script: String,
    seeds: SeedSet,
) -> Result<RenderOutput, ApiError> {
    let gateway = state.gateway.clone();
    tokio::task::spawn_blocking(move || gateway.run(&script, seeds))
        .await
        .map_err(|e| {
            tracing::error!("execution task failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "execution task failed", "kind": "internal" })),
            )
        })?
        .map_err(internal)
}

fn respond(output: RenderOutput, uses: Option<u64>) -> ProcessResponse {
    ProcessResponse {
        body: output.body,
        actions: output.actions,
        extras: output.extras,
        uses,
    }
}

/// A malformed seed bundle is a malformed-input case: default, don't fail.
fn parse_seed_bundle(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!("unparseable seed bundle, defaulting: {e}");
        Value::Null
    })
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn missing_script() -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "missing tagscript", "kind": "bad_request" })),
    )
}

fn internal(err: GatewayError) -> ApiError {
    tracing::warn!(kind = err.kind(), "request failed: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": err.to_string(), "kind": err.kind() })),
    )
}
