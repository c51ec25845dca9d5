//! Dashboard API routes.
//!
//! Every section here is fail-soft: a failing dependency degrades its own
//! field of the response, never the whole request.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_yaml::Value;

use crate::{
    probe::ProbeOutcome,
    provider_config::{self, ProviderCredentials},
    queue::QueueStatus,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub episodes_count: i64,
    pub entities_count: i64,
    pub relationships_count: i64,
    pub last_activity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Graph-wide statistics, database-neutral via the MCP server
pub async fn get_stats(State(state): State<AppState>) -> Json<DashboardStats> {
    match state.mcp.graph_stats().await {
        Ok(envelope) if envelope.success => Json(DashboardStats {
            episodes_count: envelope.stats.episodes,
            entities_count: envelope.stats.nodes,
            relationships_count: envelope.stats.edges,
            last_activity: None,
            error: None,
        }),
        Ok(envelope) => Json(DashboardStats {
            episodes_count: 0,
            entities_count: 0,
            relationships_count: 0,
            last_activity: None,
            error: envelope.error,
        }),
        Err(e) => Json(DashboardStats {
            episodes_count: 0,
            entities_count: 0,
            relationships_count: 0,
            last_activity: None,
            error: Some(e.to_string()),
        }),
    }
}

#[derive(Debug, Serialize)]
pub struct McpServerSection {
    pub status: &'static str,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct GraphDatabaseSection {
    pub status: &'static str,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProviderSection {
    pub provider: String,
    pub model: String,
    pub api_url: String,
    #[serde(flatten)]
    pub check: ProbeOutcome,
}

#[derive(Debug, Serialize)]
pub struct QueueSection {
    pub total_pending: i64,
    pub currently_processing: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ServiceStatusResponse {
    pub graphiti_mcp: McpServerSection,
    pub graph_database: GraphDatabaseSection,
    pub llm: ProviderSection,
    pub embedder: ProviderSection,
    pub queue: QueueSection,
}

async fn provider_section(state: &AppState, creds: ProviderCredentials) -> ProviderSection {
    let check = state
        .probe
        .check(&creds.api_url, &creds.api_key, &creds.model, &creds.provider)
        .await;

    ProviderSection {
        provider: creds.provider,
        model: creds.model,
        api_url: creds.api_url,
        check,
    }
}

/// Status of all collaborating services
pub async fn get_service_status(State(state): State<AppState>) -> Json<ServiceStatusResponse> {
    // Graph database health via the MCP server (DB-neutral)
    let graph_status = match state.mcp.health_check().await {
        Ok(true) => "healthy",
        _ => "unreachable",
    };

    // A missing config document just renders every provider unconfigured
    let config =
        provider_config::read_config(&state.config.config_path).unwrap_or(Value::Null);

    let llm = provider_section(&state, provider_config::llm_credentials(&config)).await;
    let embedder = provider_section(&state, provider_config::embedder_credentials(&config)).await;

    let queue_status = state.queue.get_status().await;

    Json(ServiceStatusResponse {
        graphiti_mcp: McpServerSection {
            status: graph_status,
            url: state.config.mcp_url.clone(),
        },
        graph_database: GraphDatabaseSection {
            status: graph_status,
            provider: state.config.graph_provider.clone(),
            browser_url: (state.config.graph_provider == "falkordb")
                .then(|| state.config.falkordb_browser_url.clone()),
        },
        llm,
        embedder,
        queue: QueueSection {
            total_pending: queue_status.pending_count,
            currently_processing: queue_status.processing_count,
            error: queue_status.error,
        },
    })
}

/// Raw aggregate queue status
pub async fn get_queue_status(State(state): State<AppState>) -> Json<QueueStatus> {
    Json(state.queue.get_status().await)
}
