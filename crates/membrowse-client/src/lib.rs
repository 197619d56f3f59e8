//! AgentCore Memory clients: REST over SigV4 for production, a mock for tests.

mod agentcore;
mod config;
#[cfg(feature = "test-util")]
pub mod mock;
mod signer;

pub use agentcore::AgentCoreClient;
pub use config::{AgentCoreConfig, ConfigError};
pub use membrowse_types::{ControlPlane, DataPlane, RemoteError};

#[cfg(feature = "test-util")]
pub use mock::{MockAgentCore, RecordedCall};
