//! Client configuration: region and credentials from the default AWS provider chain,
//! endpoint overrides from the environment.

use aws_config::BehaviorVersion;
use aws_credential_types::provider::SharedCredentialsProvider;

const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no AWS credentials provider could be configured")]
    NoCredentials,
}

/// Region, endpoints and credentials for [`crate::AgentCoreClient`].
#[derive(Clone)]
pub struct AgentCoreConfig {
    pub region: String,
    pub control_endpoint: String,
    pub data_endpoint: String,
    /// Asked for credentials on every request, so expiring sessions refresh.
    pub credentials: SharedCredentialsProvider,
}

impl std::fmt::Debug for AgentCoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentCoreConfig")
            .field("region", &self.region)
            .field("control_endpoint", &self.control_endpoint)
            .field("data_endpoint", &self.data_endpoint)
            .finish_non_exhaustive()
    }
}

impl AgentCoreConfig {
    /// Resolve region and credentials the way the AWS SDKs do (environment, shared
    /// config and credentials files, SSO, container and instance roles).
    pub async fn load() -> Result<Self, ConfigError> {
        let sdk = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let region = sdk.region().map(|r| r.to_string());
        let credentials = sdk
            .credentials_provider()
            .ok_or(ConfigError::NoCredentials)?;
        if let Some(ref region) = region {
            tracing::info!(region = %region, "resolved AWS region");
        }
        Ok(Self::from_lookup(region, credentials, |key| std::env::var(key).ok()))
    }

    /// Build from a resolved region and provider; endpoint overrides come from `lookup`,
    /// where empty values count as unset.
    pub fn from_lookup<F>(
        region: Option<String>,
        credentials: SharedCredentialsProvider,
        lookup: F,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let region = region
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let control_endpoint = get("AGENTCORE_CONTROL_ENDPOINT").unwrap_or_else(|| {
            format!("https://bedrock-agentcore-control.{}.amazonaws.com", region)
        });
        let data_endpoint = get("AGENTCORE_DATA_ENDPOINT")
            .unwrap_or_else(|| format!("https://bedrock-agentcore.{}.amazonaws.com", region));

        Self {
            region,
            control_endpoint: control_endpoint.trim_end_matches('/').to_string(),
            data_endpoint: data_endpoint.trim_end_matches('/').to_string(),
            credentials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_credential_types::provider::ProvideCredentials;
    use aws_credential_types::Credentials;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn provider() -> SharedCredentialsProvider {
        SharedCredentialsProvider::new(Credentials::new(
            "AKIDEXAMPLE",
            "secret",
            Some("token".to_string()),
            None,
            "test",
        ))
    }

    #[test]
    fn endpoints_follow_region() {
        let cfg =
            AgentCoreConfig::from_lookup(Some("eu-west-1".to_string()), provider(), lookup(&[]));
        assert_eq!(cfg.region, "eu-west-1");
        assert_eq!(
            cfg.control_endpoint,
            "https://bedrock-agentcore-control.eu-west-1.amazonaws.com"
        );
        assert_eq!(cfg.data_endpoint, "https://bedrock-agentcore.eu-west-1.amazonaws.com");
    }

    #[test]
    fn defaults_and_overrides() {
        let cfg = AgentCoreConfig::from_lookup(
            Some(String::new()),
            provider(),
            lookup(&[
                ("AGENTCORE_CONTROL_ENDPOINT", ""),
                ("AGENTCORE_DATA_ENDPOINT", "http://localhost:9000/"),
            ]),
        );
        assert_eq!(cfg.region, "us-east-1");
        assert_eq!(
            cfg.control_endpoint,
            "https://bedrock-agentcore-control.us-east-1.amazonaws.com"
        );
        assert_eq!(cfg.data_endpoint, "http://localhost:9000");
    }

    #[tokio::test]
    async fn credentials_come_from_the_provider() {
        let cfg = AgentCoreConfig::from_lookup(None, provider(), lookup(&[]));
        let creds = cfg.credentials.provide_credentials().await.unwrap();
        assert_eq!(creds.access_key_id(), "AKIDEXAMPLE");
        assert_eq!(creds.session_token(), Some("token"));
        assert!(!format!("{:?}", cfg).contains("AKIDEXAMPLE"));
    }
}
