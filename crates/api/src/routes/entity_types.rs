//! Entity-type API routes - proxies to the MCP server

use std::sync::OnceLock;

use axum::{
    extract::{Path, State},
    Json,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult},
    mcp::{CreateEntityType, EntityType, EntityTypeField, ResetOutcome, UpdateEntityType},
    state::AppState,
};

/// Minimum description length for useful LLM extraction prompts
const MIN_DESCRIPTION_LEN: usize = 10;

#[allow(clippy::expect_used)] // pattern is a compile-time constant
fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("invalid pattern"))
}

fn validate_name(name: &str) -> Result<(), ApiError> {
    if name_pattern().is_match(name) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Entity type name must be PascalCase: '{name}'"
        )))
    }
}

fn validate_description(description: &str) -> Result<(), ApiError> {
    if description.len() < MIN_DESCRIPTION_LEN {
        return Err(ApiError::Validation(format!(
            "Description must be at least {MIN_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateEntityTypeRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub fields: Vec<EntityTypeField>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEntityTypeRequest {
    pub description: Option<String>,
    pub fields: Option<Vec<EntityTypeField>>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// List all entity types from the MCP server
pub async fn list_entity_types(State(state): State<AppState>) -> ApiResult<Json<Vec<EntityType>>> {
    Ok(Json(state.mcp.list_entity_types().await?))
}

/// Create a new entity type
pub async fn create_entity_type(
    State(state): State<AppState>,
    Json(request): Json<CreateEntityTypeRequest>,
) -> ApiResult<Json<EntityType>> {
    validate_name(&request.name)?;
    validate_description(&request.description)?;

    let created = state
        .mcp
        .create_entity_type(&CreateEntityType {
            name: request.name,
            description: request.description,
            fields: request.fields,
        })
        .await?;

    Ok(Json(created))
}

/// Reset entity types to the config-file defaults
pub async fn reset_entity_types(State(state): State<AppState>) -> ApiResult<Json<ResetOutcome>> {
    Ok(Json(state.mcp.reset_entity_types().await?))
}

/// Get a specific entity type
pub async fn get_entity_type(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<EntityType>> {
    Ok(Json(state.mcp.get_entity_type(&name).await?))
}

/// Update an entity type
pub async fn update_entity_type(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<UpdateEntityTypeRequest>,
) -> ApiResult<Json<EntityType>> {
    if let Some(description) = &request.description {
        validate_description(description)?;
    }

    let updated = state
        .mcp
        .update_entity_type(
            &name,
            &UpdateEntityType {
                description: request.description,
                fields: request.fields,
            },
        )
        .await?;

    Ok(Json(updated))
}

/// Delete an entity type
pub async fn delete_entity_type(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    state.mcp.delete_entity_type(&name).await?;

    Ok(Json(DeleteResponse {
        message: format!("Entity type '{name}' deleted"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        assert!(validate_name("Person").is_ok());
        assert!(validate_name("ProjectMilestone2").is_ok());

        assert!(validate_name("person").is_err());
        assert!(validate_name("Person Type").is_err());
        assert!(validate_name("2Person").is_err());
        assert!(validate_name("").is_err());
        assert!(validate_name("Person_Type").is_err());
    }

    #[test]
    fn test_description_validation() {
        assert!(validate_description("A person mentioned in an episode").is_ok());
        assert!(validate_description("too short").is_err());
        assert!(validate_description("").is_err());
    }
}
