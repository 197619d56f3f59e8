//! Request-level failures and their HTTP mapping.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use membrowse_types::RemoteError;

/// Outcome of a failed request. Renders as `{"detail": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
    /// Query string or body the extractor could not decode.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected { status, .. } => *status,
        }
    }

    /// Any remote fault as a 500 carrying the fault text.
    pub fn remote(context: &str, err: RemoteError) -> Self {
        tracing::error!(error = %err, "error {}", context);
        ApiError::Internal(err.to_string())
    }

    /// Not-found faults become a 404 with `message`; everything else goes through [`Self::remote`].
    pub fn remote_or_not_found(context: &str, err: RemoteError, message: &'static str) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(message)
        } else {
            Self::remote(context, err)
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_tier_fault_mapping() {
        let missing = RemoteError::from_code("GetMemory", "ResourceNotFoundException", "m1");
        let err = ApiError::remote_or_not_found("getting memory m1", missing, "Memory not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Memory not found");

        let throttled = RemoteError::from_code("GetMemory", "ThrottlingException", "slow down");
        let err = ApiError::remote_or_not_found("getting memory m1", throttled, "Memory not found");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "An error occurred (ThrottlingException) when calling the GetMemory operation: slow down"
        );
    }

    #[test]
    fn list_faults_are_never_404() {
        let missing = RemoteError::from_code("ListEvents", "ResourceNotFoundException", "no memory");
        let err = ApiError::remote("listing events", missing);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn rejections_keep_extractor_status() {
        let err = ApiError::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: "missing field `namespace`".to_string(),
        };
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "missing field `namespace`");
    }
}
