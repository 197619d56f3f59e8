//! Core types and traits for the AgentCore Memory browser.
//!
//! DTOs mirror the AgentCore Memory resource model and keep its camelCase wire names.

mod dto;
mod page;
mod params;
mod traits;

pub use dto::*;
pub use page::Page;
pub use params::*;
pub use traits::*;
