//! Traits for the two AgentCore Memory planes.
//!
//! Both return the raw JSON response; shaping into DTOs happens in the API layer.

use crate::{
    CreateEventParams, DeleteEventParams, DeleteMemoryRecordParams, ListEventsParams,
    ListMemoriesParams, ListMemoryRecordsParams, RetrieveMemoryRecordsParams,
};
use async_trait::async_trait;
use serde_json::Value;

/// Error code the service uses for absent resources.
pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

/// Control plane: memory and strategy metadata.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    async fn list_memories(&self, params: &ListMemoriesParams) -> Result<Value, RemoteError>;

    /// Response carries the memory under `"memory"`.
    async fn get_memory(&self, memory_id: &str) -> Result<Value, RemoteError>;
}

/// Data plane: events and memory records.
#[async_trait]
pub trait DataPlane: Send + Sync {
    async fn list_events(&self, params: &ListEventsParams) -> Result<Value, RemoteError>;

    async fn list_memory_records(
        &self,
        params: &ListMemoryRecordsParams,
    ) -> Result<Value, RemoteError>;

    async fn retrieve_memory_records(
        &self,
        params: &RetrieveMemoryRecordsParams,
    ) -> Result<Value, RemoteError>;

    /// Response carries the created event under `"event"`.
    async fn create_event(&self, params: &CreateEventParams) -> Result<Value, RemoteError>;

    async fn delete_event(&self, params: &DeleteEventParams) -> Result<Value, RemoteError>;

    async fn delete_memory_record(
        &self,
        params: &DeleteMemoryRecordParams,
    ) -> Result<Value, RemoteError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    #[error("An error occurred (ResourceNotFoundException) when calling the {operation} operation: {message}")]
    NotFound { operation: String, message: String },
    #[error("An error occurred ({code}) when calling the {operation} operation: {message}")]
    Service {
        operation: String,
        code: String,
        message: String,
    },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("signing error: {0}")]
    Signing(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl RemoteError {
    /// Build a service fault from its error code, classifying not-found.
    pub fn from_code(operation: &str, code: &str, message: impl Into<String>) -> Self {
        if code == RESOURCE_NOT_FOUND {
            RemoteError::NotFound {
                operation: operation.to_string(),
                message: message.into(),
            }
        } else {
            RemoteError::Service {
                operation: operation.to_string(),
                code: code.to_string(),
                message: message.into(),
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_code_is_classified() {
        let err = RemoteError::from_code("GetMemory", RESOURCE_NOT_FOUND, "Memory m1 not found");
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "An error occurred (ResourceNotFoundException) when calling the GetMemory operation: Memory m1 not found"
        );
    }

    #[test]
    fn other_codes_are_service_faults() {
        let err = RemoteError::from_code("ListEvents", "AccessDeniedException", "denied");
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "An error occurred (AccessDeniedException) when calling the ListEvents operation: denied"
        );
    }
}
