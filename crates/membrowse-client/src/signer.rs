//! AWS Signature V4 for outgoing requests.

use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningSettings};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use membrowse_types::RemoteError;
use std::time::SystemTime;

/// Signing name shared by the control and data planes.
pub(crate) const SIGNING_NAME: &str = "bedrock-agentcore";

pub(crate) struct Signer {
    credentials: SharedCredentialsProvider,
    region: String,
}

impl Signer {
    pub(crate) fn new(credentials: SharedCredentialsProvider, region: String) -> Self {
        Self {
            credentials,
            region,
        }
    }

    /// Headers to add so the request carries a valid signature.
    ///
    /// `headers` must hold every header that will be sent, including `host`. Credentials are
    /// fetched from the provider each time; it caches and refreshes them.
    pub(crate) async fn sign(
        &self,
        method: &str,
        url: &str,
        headers: &[(String, String)],
        body: &[u8],
    ) -> Result<Vec<(String, String)>, RemoteError> {
        let credentials = self
            .credentials
            .provide_credentials()
            .await
            .map_err(|e| RemoteError::Signing(format!("resolving credentials: {}", e)))?;
        let identity: Identity = credentials.into();
        let params = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(SIGNING_NAME)
            .time(SystemTime::now())
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| RemoteError::Signing(e.to_string()))?
            .into();
        let signable = SignableRequest::new(
            method,
            url,
            headers.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            SignableBody::Bytes(body),
        )
        .map_err(|e| RemoteError::Signing(e.to_string()))?;
        let (instructions, _signature) = sign(signable, &params)
            .map_err(|e| RemoteError::Signing(e.to_string()))?
            .into_parts();
        Ok(instructions
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect())
    }
}
