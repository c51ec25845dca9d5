//! Graphiti Admin API Library
//!
//! This crate contains the admin backend for a Graphiti knowledge-graph
//! deployment: configuration views, entity-type management proxied to the
//! MCP server, and health/queue dashboards.

pub mod auth;
pub mod config;
pub mod error;
pub mod mcp;
pub mod probe;
pub mod provider_config;
pub mod queue;
pub mod routes;
pub mod state;

pub use config::Settings;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
