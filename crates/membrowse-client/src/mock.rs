//! Mock AgentCore for tests: canned responses per operation, no network.

use membrowse_types::{
    ControlPlane, CreateEventParams, DataPlane, DeleteEventParams, DeleteMemoryRecordParams,
    ListEventsParams, ListMemoriesParams, ListMemoryRecordsParams, RemoteError,
    RetrieveMemoryRecordsParams,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// One call the mock received: operation name plus its parameter mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: &'static str,
    pub params: Value,
}

/// Implements both planes. Operations without a canned outcome answer `{}`.
#[derive(Default)]
pub struct MockAgentCore {
    outcomes: HashMap<&'static str, Result<Value, RemoteError>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockAgentCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `operation` (e.g. `"ListEvents"`) with `response`.
    pub fn with_response(mut self, operation: &'static str, response: Value) -> Self {
        self.outcomes.insert(operation, Ok(response));
        self
    }

    /// Fail `operation` with `error`.
    pub fn with_error(mut self, operation: &'static str, error: RemoteError) -> Self {
        self.outcomes.insert(operation, Err(error));
        self
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    async fn answer<P: Serialize>(
        &self,
        operation: &'static str,
        params: &P,
    ) -> Result<Value, RemoteError> {
        let params = serde_json::to_value(params).unwrap_or(Value::Null);
        self.calls
            .lock()
            .await
            .push(RecordedCall { operation, params });
        self.outcomes
            .get(operation)
            .cloned()
            .unwrap_or_else(|| Ok(json!({})))
    }
}

#[async_trait::async_trait]
impl ControlPlane for MockAgentCore {
    async fn list_memories(&self, params: &ListMemoriesParams) -> Result<Value, RemoteError> {
        self.answer("ListMemories", params).await
    }

    async fn get_memory(&self, memory_id: &str) -> Result<Value, RemoteError> {
        self.answer("GetMemory", &json!({ "memoryId": memory_id }))
            .await
    }
}

#[async_trait::async_trait]
impl DataPlane for MockAgentCore {
    async fn list_events(&self, params: &ListEventsParams) -> Result<Value, RemoteError> {
        self.answer("ListEvents", params).await
    }

    async fn list_memory_records(
        &self,
        params: &ListMemoryRecordsParams,
    ) -> Result<Value, RemoteError> {
        self.answer("ListMemoryRecords", params).await
    }

    async fn retrieve_memory_records(
        &self,
        params: &RetrieveMemoryRecordsParams,
    ) -> Result<Value, RemoteError> {
        self.answer("RetrieveMemoryRecords", params).await
    }

    async fn create_event(&self, params: &CreateEventParams) -> Result<Value, RemoteError> {
        self.answer("CreateEvent", params).await
    }

    async fn delete_event(&self, params: &DeleteEventParams) -> Result<Value, RemoteError> {
        self.answer("DeleteEvent", params).await
    }

    async fn delete_memory_record(
        &self,
        params: &DeleteMemoryRecordParams,
    ) -> Result<Value, RemoteError> {
        self.answer("DeleteMemoryRecord", params).await
    }
}
