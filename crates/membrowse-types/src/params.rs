//! Parameter mappings for the remote operations.
//!
//! Each struct serializes to the service's camelCase parameter names. Path parameters are
//! part of the mapping; the HTTP client moves them into the URL.

use crate::EventPayload;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMemoriesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsParams {
    pub memory_id: String,
    pub session_id: String,
    pub actor_id: String,
    pub include_payloads: bool,
    pub max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMemoryRecordsParams {
    pub memory_id: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_strategy_id: Option<String>,
    pub max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub search_query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveMemoryRecordsParams {
    pub memory_id: String,
    pub namespace: String,
    pub search_criteria: SearchCriteria,
    pub max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventParams {
    pub memory_id: String,
    pub actor_id: String,
    pub session_id: String,
    /// Epoch seconds.
    pub event_timestamp: f64,
    pub payload: Vec<EventPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventParams {
    pub memory_id: String,
    pub event_id: String,
    pub session_id: String,
    pub actor_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMemoryRecordParams {
    pub memory_id: String,
    pub memory_record_id: String,
}
