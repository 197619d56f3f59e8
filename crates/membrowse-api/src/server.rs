//! Axum server and routes.

use crate::error::ApiError;
use crate::normalize::{normalize_items, validate_record};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::header,
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use membrowse_types::{
    ActionResponse, ContentType, ControlPlane, CreateEventParams, CreateRecordRequest, DataPlane,
    DeleteEventParams, DeleteMemoryRecordParams, EventPayload, EventSummary, ListEventsParams,
    ListMemoriesParams, ListMemoryRecordsParams, Memory, MemoryRecordSummary, MemorySummary, Page,
    RetrieveMemoryRecordsParams, RetrieveRequest, SearchCriteria, Strategy,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

const DEFAULT_PAGE_SIZE: u32 = 50;

pub struct AppState {
    pub control: Arc<dyn ControlPlane + Send + Sync>,
    pub data: Arc<dyn DataPlane + Send + Sync>,
    /// Generated once at startup; appended to `/` so browsers drop stale assets.
    pub cache_bust: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handle_home))
        .route("/health", get(handle_health))
        .route("/api/memories", get(handle_list_memories))
        .route("/api/memories/:memory_id", get(handle_get_memory))
        .route("/api/memories/:memory_id/events", get(handle_list_events))
        .route(
            "/api/memories/:memory_id/events/:event_id",
            delete(handle_delete_event),
        )
        .route(
            "/api/memories/:memory_id/records",
            get(handle_list_records).post(handle_create_record),
        )
        .route(
            "/api/memories/:memory_id/records/:record_id",
            delete(handle_delete_record),
        )
        .route("/api/memories/:memory_id/retrieve", post(handle_retrieve))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Empty cursors from the UI mean "first page".
fn cursor(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    #[serde(default)]
    pub v: Option<String>,
}

async fn handle_home(State(state): State<Arc<AppState>>, Query(q): Query<HomeQuery>) -> Response {
    if q.v.as_deref() != Some(state.cache_bust.as_str()) {
        return (
            axum::http::StatusCode::FOUND,
            [
                (header::LOCATION, format!("/?v={}", state.cache_bust)),
                (
                    header::CACHE_CONTROL,
                    "no-cache, no-store, must-revalidate".to_string(),
                ),
            ],
        )
            .into_response();
    }
    Html(LANDING_PAGE.replace("{{cache_bust}}", &state.cache_bust)).into_response()
}

const LANDING_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AgentCore Memory Browser</title>
<meta name="build" content="{{cache_bust}}">
</head>
<body>
<h1>AgentCore Memory Browser</h1>
<p>JSON API under <a href="/api/memories?v={{cache_bust}}">/api/memories</a>.</p>
</body>
</html>
"#;

async fn handle_health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct ListMemoriesQuery {
    #[serde(default)]
    pub max_results: Option<u32>,
    #[serde(default)]
    pub next_token: Option<String>,
}

async fn handle_list_memories(
    State(state): State<Arc<AppState>>,
    q: Result<Query<ListMemoriesQuery>, QueryRejection>,
) -> Result<Json<Page<MemorySummary>>, ApiError> {
    let Query(q) = q?;
    let params = ListMemoriesParams {
        max_results: q.max_results,
        next_token: cursor(q.next_token),
    };
    let response = state
        .control
        .list_memories(&params)
        .await
        .map_err(|e| ApiError::remote("listing memories", e))?;
    let memories = normalize_items::<MemorySummary>(&response, "memories");
    Ok(Json(Page::from_response(memories, &response, "memories")))
}

async fn handle_get_memory(
    State(state): State<Arc<AppState>>,
    Path(memory_id): Path<String>,
) -> Result<Json<Memory>, ApiError> {
    let context = format!("getting memory {}", memory_id);
    let response = state
        .control
        .get_memory(&memory_id)
        .await
        .map_err(|e| ApiError::remote_or_not_found(&context, e, "Memory not found"))?;
    let Some(raw) = response.get("memory") else {
        tracing::error!(memory_id = %memory_id, "GetMemory response has no memory");
        return Err(ApiError::Internal("'memory'".to_string()));
    };
    let strategies = normalize_items::<Strategy>(raw, "strategies");
    let memory = validate_record::<Memory>(raw).map_err(|e| {
        tracing::error!(memory_id = %memory_id, error = %e, "invalid memory");
        ApiError::Internal(e.to_string())
    })?;
    Ok(Json(memory.with_strategies(strategies)))
}

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub session_id: String,
    pub actor_id: String,
    #[serde(default = "default_page_size")]
    pub max_results: u32,
    #[serde(default)]
    pub next_token: Option<String>,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

async fn handle_list_events(
    State(state): State<Arc<AppState>>,
    Path(memory_id): Path<String>,
    q: Result<Query<ListEventsQuery>, QueryRejection>,
) -> Result<Json<Page<EventSummary>>, ApiError> {
    let Query(q) = q?;
    let params = ListEventsParams {
        memory_id,
        session_id: q.session_id,
        actor_id: q.actor_id,
        include_payloads: true,
        max_results: q.max_results,
        next_token: cursor(q.next_token),
    };
    let response = state
        .data
        .list_events(&params)
        .await
        .map_err(|e| ApiError::remote("listing events", e))?;
    let events = normalize_items::<EventSummary>(&response, "events");
    Ok(Json(Page::from_response(events, &response, "events")))
}

#[derive(Debug, Deserialize)]
pub struct ListRecordsQuery {
    pub namespace: String,
    #[serde(default)]
    pub memory_strategy_id: Option<String>,
    #[serde(default = "default_page_size")]
    pub max_results: u32,
    #[serde(default)]
    pub next_token: Option<String>,
}

async fn handle_list_records(
    State(state): State<Arc<AppState>>,
    Path(memory_id): Path<String>,
    q: Result<Query<ListRecordsQuery>, QueryRejection>,
) -> Result<Json<Page<MemoryRecordSummary>>, ApiError> {
    let Query(q) = q?;
    let params = ListMemoryRecordsParams {
        memory_id,
        namespace: q.namespace,
        memory_strategy_id: q.memory_strategy_id.filter(|s| !s.is_empty()),
        max_results: q.max_results,
        next_token: cursor(q.next_token),
    };
    let response = state
        .data
        .list_memory_records(&params)
        .await
        .map_err(|e| ApiError::remote("listing records", e))?;
    let records = normalize_items::<MemoryRecordSummary>(&response, "memoryRecordSummaries");
    Ok(Json(Page::from_response(records, &response, "records")))
}

async fn handle_retrieve(
    State(state): State<Arc<AppState>>,
    Path(memory_id): Path<String>,
    req: Result<Json<RetrieveRequest>, JsonRejection>,
) -> Result<Json<Page<MemoryRecordSummary>>, ApiError> {
    let Json(req) = req?;
    let params = RetrieveMemoryRecordsParams {
        memory_id,
        namespace: req.namespace,
        search_criteria: SearchCriteria {
            search_query: req.query,
        },
        max_results: req.max_results,
        next_token: cursor(req.next_token),
    };
    let response = state
        .data
        .retrieve_memory_records(&params)
        .await
        .map_err(|e| ApiError::remote("retrieving records", e))?;
    let records = normalize_items::<MemoryRecordSummary>(&response, "memoryRecordSummaries");
    Ok(Json(Page::from_response(records, &response, "records")))
}

#[derive(Debug, Deserialize)]
pub struct DeleteEventQuery {
    pub session_id: String,
    pub actor_id: String,
}

async fn handle_delete_event(
    State(state): State<Arc<AppState>>,
    Path((memory_id, event_id)): Path<(String, String)>,
    q: Result<Query<DeleteEventQuery>, QueryRejection>,
) -> Result<Json<ActionResponse>, ApiError> {
    let Query(q) = q?;
    let context = format!("deleting event {}", event_id);
    let params = DeleteEventParams {
        memory_id,
        event_id,
        session_id: q.session_id,
        actor_id: q.actor_id,
    };
    state
        .data
        .delete_event(&params)
        .await
        .map_err(|e| ApiError::remote_or_not_found(&context, e, "Event not found"))?;
    tracing::info!(memory_id = %params.memory_id, event_id = %params.event_id, "event deleted");
    Ok(Json(ActionResponse::ok("Event deleted successfully")))
}

#[derive(Debug, Deserialize)]
pub struct DeleteRecordQuery {
    /// Required by the UI contract; the service addresses records by id alone.
    pub namespace: String,
}

async fn handle_delete_record(
    State(state): State<Arc<AppState>>,
    Path((memory_id, record_id)): Path<(String, String)>,
    q: Result<Query<DeleteRecordQuery>, QueryRejection>,
) -> Result<Json<ActionResponse>, ApiError> {
    let Query(q) = q?;
    let context = format!("deleting memory record {}", record_id);
    let params = DeleteMemoryRecordParams {
        memory_id,
        memory_record_id: record_id,
    };
    state
        .data
        .delete_memory_record(&params)
        .await
        .map_err(|e| ApiError::remote_or_not_found(&context, e, "Memory record not found"))?;
    tracing::info!(
        memory_id = %params.memory_id,
        record_id = %params.memory_record_id,
        namespace = %q.namespace,
        "memory record deleted"
    );
    Ok(Json(ActionResponse::ok("Memory record deleted successfully")))
}

/// Build the event payload for a create-record request.
fn record_payload(req: &CreateRecordRequest) -> Result<EventPayload, ApiError> {
    match req.content_type {
        ContentType::Text | ContentType::Other => Ok(EventPayload::conversational(
            req.content.clone(),
            req.role.clone(),
        )),
        ContentType::Json => {
            serde_json::from_str::<serde_json::Value>(&req.content)
                .map_err(|e| ApiError::BadRequest(format!("Invalid JSON: {}", e)))?;
            Ok(EventPayload::Blob(serde_json::Value::String(
                req.content.clone(),
            )))
        }
    }
}

async fn handle_create_record(
    State(state): State<Arc<AppState>>,
    Path(memory_id): Path<String>,
    req: Result<Json<CreateRecordRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>, ApiError> {
    let Json(req) = req?;
    let payload = record_payload(&req)?;
    let params = CreateEventParams {
        memory_id,
        actor_id: req.actor_id().to_string(),
        session_id: req.session_id().to_string(),
        event_timestamp: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
        payload: vec![payload],
    };
    let response = state
        .data
        .create_event(&params)
        .await
        .map_err(|e| ApiError::remote("creating event", e))?;
    let event_id = response
        .get("event")
        .and_then(|e| e.get("eventId"))
        .and_then(|v| v.as_str())
        .map(String::from);
    tracing::info!(memory_id = %params.memory_id, event_id = ?event_id, "event created");
    Ok(Json(ActionResponse {
        success: true,
        message: "Event created successfully".to_string(),
        event_id,
    }))
}
