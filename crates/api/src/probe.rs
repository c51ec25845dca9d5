//! Model-provider connectivity probes.
//!
//! Best-effort checks against OpenAI-compatible `/models` listings (or a bare
//! reachability probe for Anthropic, which has no listing endpoint). Probes
//! are advisory only and never sit on the write path of any operation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fixed timeout for outbound probes (10 seconds)
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on error messages carried into responses
const MAX_ERROR_LEN: usize = 200;

/// Classified result of a connectivity probe.
///
/// Tagged so callers cannot observe ill-formed combinations like a healthy
/// status with a populated error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// API URL not configured; no network call was attempted
    Unconfigured,
    /// Endpoint reachable and the configured model is available
    Healthy {
        #[serde(skip_serializing_if = "Vec::is_empty")]
        available_models: Vec<String>,
    },
    /// Endpoint reachable but the configured model is missing
    ModelNotFound {
        error: String,
        available_models: Vec<String>,
    },
    /// Probe exceeded the fixed timeout
    Timeout,
    /// Connection could not be established
    Unreachable,
    /// Any other failure (non-200 status, parse error)
    Error { error: String },
}

impl ProbeOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            ProbeOutcome::Unconfigured => "unconfigured",
            ProbeOutcome::Healthy { .. } => "healthy",
            ProbeOutcome::ModelNotFound { .. } => "model_not_found",
            ProbeOutcome::Timeout => "timeout",
            ProbeOutcome::Unreachable => "unreachable",
            ProbeOutcome::Error { .. } => "error",
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, ProbeOutcome::Healthy { .. })
    }

    pub fn available_models(&self) -> &[String] {
        match self {
            ProbeOutcome::Healthy { available_models }
            | ProbeOutcome::ModelNotFound { available_models, .. } => available_models,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Unconfigured => Some("API URL not configured"),
            ProbeOutcome::ModelNotFound { error, .. } | ProbeOutcome::Error { error } => {
                Some(error)
            }
            ProbeOutcome::Timeout => Some("Connection timed out"),
            ProbeOutcome::Unreachable => Some("Could not connect to API"),
            ProbeOutcome::Healthy { .. } => None,
        }
    }
}

/// OpenAI-compatible model listing response shape
#[derive(Debug, Deserialize)]
struct ModelListing {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    #[serde(default)]
    id: String,
}

/// Check whether the configured model appears in the available list.
///
/// Matches exactly or by tag prefix, so "llama3" matches "llama3:latest".
pub fn model_matches(model: &str, ids: &[String]) -> bool {
    let tagged = format!("{model}:");
    ids.iter().any(|id| id == model || id.starts_with(&tagged))
}

/// Connectivity checker for LLM / embedder provider endpoints
#[derive(Clone)]
pub struct ModelProbe {
    http: reqwest::Client,
}

impl ModelProbe {
    #[allow(clippy::expect_used)] // HTTP client creation failure is a fatal system error
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(PROBE_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Probe the given endpoint and classify the result
    pub async fn check(
        &self,
        api_url: &str,
        api_key: &str,
        model: &str,
        provider: &str,
    ) -> ProbeOutcome {
        if api_url.is_empty() {
            return ProbeOutcome::Unconfigured;
        }

        // Anthropic has no /models listing; any HTTP response counts as reachable
        if provider.eq_ignore_ascii_case("anthropic") {
            return self.reachability_probe(api_url).await;
        }

        let url = format!("{}/models", api_url.trim_end_matches('/'));
        let mut request = self.http.get(&url);
        if !api_key.is_empty() {
            request = request.bearer_auth(api_key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return classify_request_error(&e),
        };

        if response.status() != reqwest::StatusCode::OK {
            return ProbeOutcome::Error {
                error: format!("API returned {}", response.status().as_u16()),
            };
        }

        let listing: ModelListing = match response.json().await {
            Ok(listing) => listing,
            Err(e) => return classify_request_error(&e),
        };

        let ids: Vec<String> = listing.data.into_iter().map(|m| m.id).collect();
        if model_matches(model, &ids) {
            ProbeOutcome::Healthy {
                available_models: ids,
            }
        } else {
            ProbeOutcome::ModelNotFound {
                error: format!("Model '{model}' not found"),
                available_models: ids,
            }
        }
    }

    /// Bare reachability probe against the base URL, with a trailing /v1 trimmed
    async fn reachability_probe(&self, api_url: &str) -> ProbeOutcome {
        let base = api_url.trim_end_matches('/');
        let base = base.strip_suffix("/v1").unwrap_or(base);

        // 4xx still proves the endpoint is up
        match self.http.get(base).send().await {
            Ok(_) => ProbeOutcome::Healthy {
                available_models: Vec::new(),
            },
            Err(e) => classify_request_error(&e),
        }
    }
}

impl Default for ModelProbe {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_request_error(e: &reqwest::Error) -> ProbeOutcome {
    if e.is_timeout() {
        ProbeOutcome::Timeout
    } else if e.is_connect() {
        ProbeOutcome::Unreachable
    } else {
        ProbeOutcome::Error {
            error: truncate(&e.to_string(), MAX_ERROR_LEN),
        }
    }
}

fn truncate(message: &str, max_len: usize) -> String {
    if message.chars().count() <= max_len {
        message.to_string()
    } else {
        message.chars().take(max_len).collect()
    }
}
