//! HTTP client for the Graphiti MCP server.
//!
//! Entity-type storage and graph access are owned by the MCP server; this
//! module only proxies requests to it and maps remote status codes to local
//! outcomes.

pub mod client;
pub mod types;

pub use client::{McpClient, McpError, McpResult};
pub use types::{
    CreateEntityType, EntityType, EntityTypeField, GraphStats, GraphStatsEnvelope, HealthReply,
    ResetOutcome, UpdateEntityType,
};
