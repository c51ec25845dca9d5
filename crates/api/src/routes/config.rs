//! Configuration API routes.
//!
//! Configuration is read-only from environment variables and the mounted
//! config document. To change settings, edit the mounts and restart the
//! stack.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    error::ApiResult,
    probe::ProbeOutcome,
    provider_config::{self, ProviderCredentials},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct LlmConfigResponse {
    pub api_url: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct EmbedderConfigResponse {
    pub api_url: String,
    pub model: String,
    pub dimensions: u32,
}

/// Connectivity status shared by the LLM and embedder status responses
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub api_url: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
    pub status: &'static str,
    pub model_available: bool,
    pub available_models: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusResponse {
    fn new(creds: ProviderCredentials, outcome: ProbeOutcome, dimensions: Option<u32>) -> Self {
        Self {
            api_url: creds.api_url,
            model: creds.model,
            dimensions,
            status: outcome.status(),
            model_available: outcome.is_healthy(),
            available_models: outcome.available_models().to_vec(),
            error: outcome.error_message().map(str::to_string),
        }
    }
}

/// Get current LLM configuration
pub async fn get_llm_config(State(state): State<AppState>) -> ApiResult<Json<LlmConfigResponse>> {
    let config = provider_config::read_config(&state.config.config_path)?;
    let creds = provider_config::llm_credentials(&config);

    Ok(Json(LlmConfigResponse {
        api_url: creds.api_url,
        model: creds.model,
    }))
}

/// Get LLM configuration with connectivity and model availability status
pub async fn get_llm_status(State(state): State<AppState>) -> ApiResult<Json<StatusResponse>> {
    let config = provider_config::read_config(&state.config.config_path)?;
    let creds = provider_config::llm_credentials(&config);

    let outcome = state
        .probe
        .check(&creds.api_url, &creds.api_key, &creds.model, &creds.provider)
        .await;

    Ok(Json(StatusResponse::new(creds, outcome, None)))
}

/// Get current embedder configuration
pub async fn get_embedder_config(
    State(state): State<AppState>,
) -> ApiResult<Json<EmbedderConfigResponse>> {
    let config = provider_config::read_config(&state.config.config_path)?;
    let creds = provider_config::embedder_credentials(&config);

    Ok(Json(EmbedderConfigResponse {
        api_url: creds.api_url,
        model: creds.model,
        dimensions: creds.dimensions.unwrap_or(768),
    }))
}

/// Get embedder configuration with connectivity and model availability status
pub async fn get_embedder_status(
    State(state): State<AppState>,
) -> ApiResult<Json<StatusResponse>> {
    let config = provider_config::read_config(&state.config.config_path)?;
    let creds = provider_config::embedder_credentials(&config);

    let outcome = state
        .probe
        .check(&creds.api_url, &creds.api_key, &creds.model, &creds.provider)
        .await;

    let dimensions = creds.dimensions;
    Ok(Json(StatusResponse::new(creds, outcome, dimensions)))
}

#[derive(Debug, Serialize)]
pub struct FullConfigResponse {
    pub config: serde_yaml::Value,
}

/// Get the full config document with api_key values masked
pub async fn get_full_config(State(state): State<AppState>) -> ApiResult<Json<FullConfigResponse>> {
    let mut config = provider_config::read_config(&state.config.config_path)?;
    provider_config::mask_config(&mut config);

    Ok(Json(FullConfigResponse { config }))
}
