//! Resource DTOs and request/response bodies of the browser API.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A record schema the response normalizer can validate raw items against.
pub trait Record: DeserializeOwned {
    /// Name used in diagnostics when an item is dropped.
    const KIND: &'static str;
}

/// Point in time as returned by the service: epoch seconds or a preformatted string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Epoch(f64),
    Text(String),
}

impl Timestamp {
    /// RFC 3339 rendering in UTC; `None` for strings or out-of-range epochs.
    pub fn to_rfc3339(&self) -> Option<String> {
        match self {
            Timestamp::Epoch(secs) => {
                let millis = (secs * 1000.0).round() as i64;
                chrono::DateTime::from_timestamp_millis(millis).map(|dt| dt.to_rfc3339())
            }
            Timestamp::Text(_) => None,
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Timestamp::Text(s) => serializer.serialize_str(s),
            Timestamp::Epoch(secs) => match self.to_rfc3339() {
                Some(s) => serializer.serialize_str(&s),
                None => serializer.serialize_f64(*secs),
            },
        }
    }
}

/// Entry of the ListMemories response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySummary {
    pub id: String,
    pub arn: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for MemorySummary {
    const KIND: &'static str = "MemorySummary";
}

/// Memory strategy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub strategy_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub strategy_type: String,
    pub status: String,
    pub namespaces: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for Strategy {
    const KIND: &'static str = "Strategy";
}

/// Complete memory details (GetMemory).
///
/// `strategies` is not read from the raw memory: each strategy is validated on its own
/// and attached with [`Memory::with_strategies`], so one bad strategy never hides the memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: String,
    pub arn: String,
    pub name: String,
    pub status: String,
    #[serde(default, skip_deserializing)]
    pub strategies: Vec<Strategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_key_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_execution_role_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_expiry_duration: Option<i64>,
}

impl Memory {
    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }
}

impl Record for Memory {
    const KIND: &'static str = "Memory";
}

/// Text body of a conversational payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationalContent {
    pub text: String,
}

/// One conversational turn (role is USER, ASSISTANT, TOOL or OTHER).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationalPayload {
    pub content: ConversationalContent,
    pub role: String,
}

/// One item of an event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventPayload {
    Conversational(ConversationalPayload),
    Blob(Value),
    /// Any shape the service adds later; kept verbatim.
    #[serde(untagged)]
    Other(Value),
}

impl EventPayload {
    pub fn conversational(text: impl Into<String>, role: impl Into<String>) -> Self {
        EventPayload::Conversational(ConversationalPayload {
            content: ConversationalContent { text: text.into() },
            role: role.into(),
        })
    }
}

/// Event information (ListEvents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub event_id: String,
    pub session_id: String,
    pub actor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_timestamp: Option<Timestamp>,
    /// Legacy fallback for `event_timestamp`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Vec<EventPayload>>,
    /// Legacy fallback for `payload`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Map<String, Value>>,
}

impl EventSummary {
    /// `eventTimestamp`, or the legacy `createdAt` when absent.
    pub fn timestamp(&self) -> Option<&Timestamp> {
        self.event_timestamp.as_ref().or(self.created_at.as_ref())
    }
}

impl Record for EventSummary {
    const KIND: &'static str = "EventSummary";
}

/// Memory record information (ListMemoryRecords, RetrieveMemoryRecords).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecordSummary {
    #[serde(alias = "memoryRecordId")]
    pub record_id: String,
    pub memory_strategy_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespaces: Option<Vec<String>>,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Record for MemoryRecordSummary {
    const KIND: &'static str = "MemoryRecordSummary";
}

/// Search request body for `/retrieve`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveRequest {
    pub query: String,
    pub namespace: String,
    #[serde(default = "default_retrieve_max_results")]
    pub max_results: u32,
    #[serde(default)]
    pub next_token: Option<String>,
}

fn default_retrieve_max_results() -> u32 {
    10
}

/// How the content of a create-record request is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Text,
    Json,
    /// Any other label; handled like `Text`.
    #[serde(other)]
    Other,
}

/// Body of `POST /api/memories/{id}/records`; creates an event the strategies extract from.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    pub content: String,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default = "default_scope_id")]
    pub actor_id: String,
    #[serde(default = "default_scope_id")]
    pub session_id: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_scope_id() -> String {
    "default".to_string()
}

fn default_role() -> String {
    "USER".to_string()
}

impl CreateRecordRequest {
    /// Actor id, `default` when blank.
    pub fn actor_id(&self) -> &str {
        non_blank_or_default(&self.actor_id)
    }

    /// Session id, `default` when blank.
    pub fn session_id(&self) -> &str {
        non_blank_or_default(&self.session_id)
    }
}

fn non_blank_or_default(s: &str) -> &str {
    if s.is_empty() {
        "default"
    } else {
        s
    }
}

/// Acknowledgement for create/delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            event_id: None,
        }
    }
}
