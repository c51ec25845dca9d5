//! MCP server HTTP client.
//!
//! Pure pass-through proxying: no caching, no retries, no local persistence.
//! Remote 404/409 are mapped to local NotFound/Conflict outcomes; everything
//! else surfaces as an upstream error.

use std::time::Duration;

use reqwest::Client;

use super::types::*;

/// Timeout for MCP server requests (30 seconds)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for MCP client operations
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("Resource not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("MCP server returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for MCP client operations
pub type McpResult<T> = Result<T, McpError>;

/// Client for the Graphiti MCP server HTTP API
#[derive(Clone)]
pub struct McpClient {
    http: Client,
    base_url: String,
}

impl McpClient {
    #[allow(clippy::expect_used)] // HTTP client creation failure is a fatal system error
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// List all entity types
    pub async fn list_entity_types(&self) -> McpResult<Vec<EntityType>> {
        let response = self.http.get(self.url("/entity-types")).send().await?;
        let response = ensure_success(response).await?;
        let listing: EntityTypeListing = response.json().await?;
        Ok(listing.entity_types)
    }

    /// Get one entity type by name
    pub async fn get_entity_type(&self, name: &str) -> McpResult<EntityType> {
        let response = self
            .http
            .get(self.url(&format!("/entity-types/{name}")))
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Create a new entity type; remote 409 maps to Conflict
    pub async fn create_entity_type(&self, request: &CreateEntityType) -> McpResult<EntityType> {
        let response = self
            .http
            .post(self.url("/entity-types"))
            .json(request)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        tracing::info!(name = %request.name, "Created entity type via MCP");
        Ok(response.json().await?)
    }

    /// Update an entity type; remote 404 maps to NotFound
    pub async fn update_entity_type(
        &self,
        name: &str,
        request: &UpdateEntityType,
    ) -> McpResult<EntityType> {
        let response = self
            .http
            .put(self.url(&format!("/entity-types/{name}")))
            .json(request)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        tracing::info!(name = %name, "Updated entity type via MCP");
        Ok(response.json().await?)
    }

    /// Delete an entity type; remote 404 maps to NotFound
    pub async fn delete_entity_type(&self, name: &str) -> McpResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/entity-types/{name}")))
            .send()
            .await?;
        ensure_success(response).await?;
        tracing::info!(name = %name, "Deleted entity type via MCP");
        Ok(())
    }

    /// Reset entity types to the config-file defaults
    pub async fn reset_entity_types(&self) -> McpResult<ResetOutcome> {
        let response = self
            .http
            .post(self.url("/entity-types/reset"))
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let outcome: ResetOutcome = response.json().await?;
        tracing::info!(count = outcome.count, "Reset entity types via MCP");
        Ok(outcome)
    }

    /// Database-neutral graph health check
    pub async fn health_check(&self) -> McpResult<bool> {
        let response = self.http.get(self.url("/health")).send().await?;
        let response = ensure_success(response).await?;
        let reply: HealthReply = response.json().await?;
        Ok(reply.healthy)
    }

    /// Graph-wide episode/node/edge counters
    pub async fn graph_stats(&self) -> McpResult<GraphStatsEnvelope> {
        let response = self.http.get(self.url("/graph/stats")).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }
}

/// Map remote error statuses to local outcomes
async fn ensure_success(response: reqwest::Response) -> McpResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = remote_error_message(response).await;
    match status.as_u16() {
        404 => Err(McpError::NotFound),
        409 => Err(McpError::Conflict(message)),
        code => Err(McpError::Upstream {
            status: code,
            message,
        }),
    }
}

/// Pull the error detail out of `{"error": "..."}` bodies, falling back to
/// the raw body text
async fn remote_error_message(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_entity_types() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/entity-types")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"entity_types": [
                    {"name": "Person", "description": "A person mentioned in an episode",
                     "fields": [{"name": "role", "type": "str", "required": false, "description": ""}],
                     "source": "config"},
                    {"name": "Project", "description": "A software project"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = McpClient::new(&server.url());
        let types = client.list_entity_types().await.unwrap();

        assert_eq!(types.len(), 2);
        assert_eq!(types[0].name, "Person");
        assert_eq!(types[0].fields[0].field_type, "str");
        assert_eq!(types[0].source.as_deref(), Some("config"));
        assert!(types[1].fields.is_empty());
    }

    #[tokio::test]
    async fn test_create_duplicate_maps_to_conflict() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/entity-types")
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Entity type 'Person' already exists"}"#)
            .create_async()
            .await;

        let client = McpClient::new(&server.url());
        let request = CreateEntityType {
            name: "Person".to_string(),
            description: "A person mentioned in an episode".to_string(),
            fields: Vec::new(),
        };
        let result = client.create_entity_type(&request).await;

        match result {
            Err(McpError::Conflict(msg)) => {
                assert_eq!(msg, "Entity type 'Person' already exists");
            }
            other => panic!("Expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_entity_type_maps_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/entity-types/Ghost")
            .with_status(404)
            .with_body(r#"{"error": "not found"}"#)
            .create_async()
            .await;

        let client = McpClient::new(&server.url());
        let result = client.get_entity_type("Ghost").await;
        assert!(matches!(result, Err(McpError::NotFound)));
    }

    #[tokio::test]
    async fn test_server_error_surfaces_as_upstream() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/entity-types/reset")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = McpClient::new(&server.url());
        let result = client.reset_entity_types().await;

        match result {
            Err(McpError::Upstream { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("Expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"healthy": true}"#)
            .create_async()
            .await;

        let client = McpClient::new(&server.url());
        assert!(client.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_graph_stats() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/graph/stats")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true, "stats": {"episodes": 12, "nodes": 340, "edges": 875}}"#)
            .create_async()
            .await;

        let client = McpClient::new(&server.url());
        let envelope = client.graph_stats().await.unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.stats.nodes, 340);
        assert_eq!(envelope.stats.edges, 875);
    }
}
