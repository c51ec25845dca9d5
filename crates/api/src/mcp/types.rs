//! Wire types for the MCP server HTTP API

use serde::{Deserialize, Serialize};

/// One structured field of an entity type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTypeField {
    pub name: String,
    /// Field type: str, int, float, bool
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    /// Field description for LLM extraction
    #[serde(default)]
    pub description: String,
}

fn default_field_type() -> String {
    "str".to_string()
}

/// Entity-type schema record, persisted by the MCP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityType {
    /// PascalCase name
    pub name: String,
    /// Description for LLM extraction
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<EntityTypeField>,
    /// Provenance: config or api
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}

/// Create payload forwarded to the MCP server
#[derive(Debug, Clone, Serialize)]
pub struct CreateEntityType {
    pub name: String,
    pub description: String,
    pub fields: Vec<EntityTypeField>,
}

/// Update payload; omitted fields are left unchanged remotely
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateEntityType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<EntityTypeField>>,
}

/// Listing envelope returned by GET /entity-types
#[derive(Debug, Deserialize)]
pub(crate) struct EntityTypeListing {
    #[serde(default)]
    pub entity_types: Vec<EntityType>,
}

/// Result of POST /entity-types/reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetOutcome {
    #[serde(default)]
    pub count: i64,
}

/// Reply from the MCP server health endpoint
#[derive(Debug, Deserialize)]
pub struct HealthReply {
    #[serde(default)]
    pub healthy: bool,
}

/// Graph-wide counters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GraphStats {
    #[serde(default)]
    pub episodes: i64,
    #[serde(default)]
    pub nodes: i64,
    #[serde(default)]
    pub edges: i64,
}

/// Envelope for GET /graph/stats
#[derive(Debug, Clone, Deserialize)]
pub struct GraphStatsEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub stats: GraphStats,
    #[serde(default)]
    pub error: Option<String>,
}
