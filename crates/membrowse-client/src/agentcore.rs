//! REST-JSON client for the AgentCore Memory control and data planes.

use crate::config::AgentCoreConfig;
use crate::signer::Signer;
use membrowse_types::{
    ControlPlane, CreateEventParams, DataPlane, DeleteEventParams, DeleteMemoryRecordParams,
    ListEventsParams, ListMemoriesParams, ListMemoryRecordsParams, RemoteError,
    RetrieveMemoryRecordsParams,
};
use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
enum Plane {
    Control,
    Data,
}

/// Client for both planes, signing every call with the configured credentials provider.
pub struct AgentCoreClient {
    http: reqwest::Client,
    signer: Signer,
    control_endpoint: Url,
    data_endpoint: Url,
}

impl AgentCoreClient {
    pub fn new(config: AgentCoreConfig) -> Result<Self, RemoteError> {
        let control_endpoint = Url::parse(&config.control_endpoint)
            .map_err(|e| RemoteError::Config(format!("control endpoint: {}", e)))?;
        let data_endpoint = Url::parse(&config.data_endpoint)
            .map_err(|e| RemoteError::Config(format!("data endpoint: {}", e)))?;
        Ok(Self {
            http: reqwest::Client::new(),
            signer: Signer::new(config.credentials, config.region),
            control_endpoint,
            data_endpoint,
        })
    }

    /// Client configured from the default AWS provider chain.
    pub async fn from_env() -> Result<Self, RemoteError> {
        let config = AgentCoreConfig::load()
            .await
            .map_err(|e| RemoteError::Config(e.to_string()))?;
        Self::new(config)
    }

    fn url(&self, plane: Plane, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = match plane {
            Plane::Control => self.control_endpoint.clone(),
            Plane::Data => self.data_endpoint.clone(),
        };
        url.path_segments_mut()
            .map_err(|_| RemoteError::Config("endpoint cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn call(
        &self,
        operation: &str,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<Value, RemoteError> {
        let body = match body {
            Some(b) => serde_json::to_vec(&b).map_err(|e| RemoteError::Transport(e.to_string()))?,
            None => Vec::new(),
        };
        let host = match (url.host_str(), url.port()) {
            (Some(h), Some(p)) => format!("{}:{}", h, p),
            (Some(h), None) => h.to_string(),
            (None, _) => return Err(RemoteError::Config(format!("endpoint has no host: {}", url))),
        };
        let headers = vec![
            ("host".to_string(), host),
            ("content-type".to_string(), "application/json".to_string()),
        ];
        let signed = self
            .signer
            .sign(method.as_str(), url.as_str(), &headers, &body)
            .await?;

        tracing::debug!(operation, %method, %url, "calling AgentCore");
        let mut req = self
            .http
            .request(method, url)
            .header("content-type", "application/json");
        for (name, value) in signed {
            req = req.header(name, value);
        }
        let res = req
            .body(body)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = res.status();
        let error_type = res
            .headers()
            .get("x-amzn-errortype")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let text = res
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(decode_fault(operation, status, error_type.as_deref(), &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_str(&text).map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }
}

/// Serialize a parameter mapping and drop the keys that went into the URL.
fn body_without<P: Serialize>(params: &P, path_keys: &[&str]) -> Result<Value, RemoteError> {
    let mut body =
        serde_json::to_value(params).map_err(|e| RemoteError::Transport(e.to_string()))?;
    if let Some(map) = body.as_object_mut() {
        for key in path_keys {
            map.remove(*key);
        }
    }
    Ok(body)
}

/// Turn an error response into a [`RemoteError`].
///
/// The code comes from `x-amzn-ErrorType` (`Code:uri`) or the body's `__type`/`code`
/// (`namespace#Code`).
fn decode_fault(
    operation: &str,
    status: reqwest::StatusCode,
    error_type: Option<&str>,
    body: &str,
) -> RemoteError {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let code = error_type
        .map(|t| t.split(':').next().unwrap_or(t).to_string())
        .or_else(|| {
            parsed
                .get("__type")
                .or_else(|| parsed.get("code"))
                .and_then(Value::as_str)
                .map(|t| t.rsplit('#').next().unwrap_or(t).to_string())
        })
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    let message = parsed
        .get("message")
        .or_else(|| parsed.get("Message"))
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| body.trim().to_string());
    RemoteError::from_code(operation, &code, message)
}

#[async_trait::async_trait]
impl ControlPlane for AgentCoreClient {
    async fn list_memories(&self, params: &ListMemoriesParams) -> Result<Value, RemoteError> {
        let url = self.url(Plane::Control, &["memories", ""])?;
        let body = body_without(params, &[])?;
        self.call("ListMemories", Method::POST, url, Some(body)).await
    }

    async fn get_memory(&self, memory_id: &str) -> Result<Value, RemoteError> {
        let url = self.url(Plane::Control, &["memories", memory_id, "details"])?;
        self.call("GetMemory", Method::GET, url, None).await
    }
}

#[async_trait::async_trait]
impl DataPlane for AgentCoreClient {
    async fn list_events(&self, params: &ListEventsParams) -> Result<Value, RemoteError> {
        let url = self.url(
            Plane::Data,
            &[
                "memories",
                params.memory_id.as_str(),
                "actor",
                params.actor_id.as_str(),
                "sessions",
                params.session_id.as_str(),
            ],
        )?;
        let body = body_without(params, &["memoryId", "actorId", "sessionId"])?;
        self.call("ListEvents", Method::POST, url, Some(body)).await
    }

    async fn list_memory_records(
        &self,
        params: &ListMemoryRecordsParams,
    ) -> Result<Value, RemoteError> {
        let url = self.url(Plane::Data, &["memories", params.memory_id.as_str(), "memoryRecords"])?;
        let body = body_without(params, &["memoryId"])?;
        self.call("ListMemoryRecords", Method::POST, url, Some(body))
            .await
    }

    async fn retrieve_memory_records(
        &self,
        params: &RetrieveMemoryRecordsParams,
    ) -> Result<Value, RemoteError> {
        let url = self.url(Plane::Data, &["memories", params.memory_id.as_str(), "retrieve"])?;
        let body = body_without(params, &["memoryId"])?;
        self.call("RetrieveMemoryRecords", Method::POST, url, Some(body))
            .await
    }

    async fn create_event(&self, params: &CreateEventParams) -> Result<Value, RemoteError> {
        let url = self.url(Plane::Data, &["memories", params.memory_id.as_str(), "events"])?;
        let body = body_without(params, &["memoryId"])?;
        self.call("CreateEvent", Method::POST, url, Some(body)).await
    }

    async fn delete_event(&self, params: &DeleteEventParams) -> Result<Value, RemoteError> {
        let url = self.url(
            Plane::Data,
            &[
                "memories",
                params.memory_id.as_str(),
                "actor",
                params.actor_id.as_str(),
                "sessions",
                params.session_id.as_str(),
                "events",
                params.event_id.as_str(),
            ],
        )?;
        self.call("DeleteEvent", Method::DELETE, url, None).await
    }

    async fn delete_memory_record(
        &self,
        params: &DeleteMemoryRecordParams,
    ) -> Result<Value, RemoteError> {
        let url = self.url(
            Plane::Data,
            &[
                "memories",
                params.memory_id.as_str(),
                "memoryRecords",
                params.memory_record_id.as_str(),
            ],
        )?;
        self.call("DeleteMemoryRecord", Method::DELETE, url, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_credential_types::provider::SharedCredentialsProvider;
    use aws_credential_types::Credentials;
    use serde_json::json;

    fn client() -> AgentCoreClient {
        let credentials = SharedCredentialsProvider::new(Credentials::new(
            "AKIDEXAMPLE",
            "secret",
            None,
            None,
            "test",
        ));
        AgentCoreClient::new(AgentCoreConfig::from_lookup(
            Some("us-west-2".to_string()),
            credentials,
            |_| None,
        ))
        .unwrap()
    }

    #[test]
    fn path_segments_are_encoded() {
        let c = client();
        let url = c
            .url(
                Plane::Data,
                &["memories", "m1", "actor", "user/42", "sessions", "s 1"],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://bedrock-agentcore.us-west-2.amazonaws.com/memories/m1/actor/user%2F42/sessions/s%201"
        );
        let list = c.url(Plane::Control, &["memories", ""]).unwrap();
        assert_eq!(
            list.as_str(),
            "https://bedrock-agentcore-control.us-west-2.amazonaws.com/memories/"
        );
    }

    #[test]
    fn path_keys_are_removed_from_body() {
        let params = ListEventsParams {
            memory_id: "m1".to_string(),
            session_id: "s1".to_string(),
            actor_id: "a1".to_string(),
            include_payloads: true,
            max_results: 50,
            next_token: None,
        };
        let body = body_without(&params, &["memoryId", "actorId", "sessionId"]).unwrap();
        assert_eq!(body, json!({ "includePayloads": true, "maxResults": 50 }));
    }

    #[test]
    fn faults_decode_from_header_or_body() {
        let err = decode_fault(
            "GetMemory",
            reqwest::StatusCode::NOT_FOUND,
            Some("ResourceNotFoundException:http://internal.amazon.com/coral/"),
            r#"{"message":"Memory m1 not found"}"#,
        );
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "An error occurred (ResourceNotFoundException) when calling the GetMemory operation: Memory m1 not found"
        );

        let err = decode_fault(
            "ListEvents",
            reqwest::StatusCode::BAD_REQUEST,
            None,
            r#"{"__type":"com.amazonaws#ValidationException","Message":"bad actor"}"#,
        );
        assert_eq!(
            err,
            RemoteError::Service {
                operation: "ListEvents".to_string(),
                code: "ValidationException".to_string(),
                message: "bad actor".to_string(),
            }
        );

        let err = decode_fault(
            "ListMemories",
            reqwest::StatusCode::BAD_GATEWAY,
            None,
            "upstream down",
        );
        assert_eq!(
            err.to_string(),
            "An error occurred (HTTP 502) when calling the ListMemories operation: upstream down"
        );
    }
}
