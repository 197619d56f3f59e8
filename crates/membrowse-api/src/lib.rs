//! HTTP backend for browsing AgentCore Memory resources.

pub mod config;
pub mod error;
pub mod normalize;
pub mod server;
