//! Mounted provider configuration (config.yaml).
//!
//! The LLM and embedder provider tables live in a YAML document mounted into
//! the container. The document is re-read and re-expanded on every call so a
//! changed environment variable shows up on the next request without a
//! restart; there is deliberately no caching layer here.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde_yaml::Value;

#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Read and parse the mounted config document
pub fn read_config(path: &Path) -> Result<Value, ConfigFileError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&raw)?)
}

#[allow(clippy::expect_used)] // pattern is a compile-time constant
fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\$\{([^}:]+)(?::([^}]*))?\}").expect("invalid pattern"))
}

/// Expand `${VAR}` and `${VAR:default}` placeholders against the process
/// environment. Unset variables without a default expand to the empty string.
pub fn expand_env_vars(value: &str) -> String {
    placeholder_pattern()
        .replace_all(value, |caps: &regex::Captures| {
            let name = &caps[1];
            let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(name).unwrap_or_else(|_| default.to_string())
        })
        .into_owned()
}

/// Expanded credentials for the active provider of one section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub provider: String,
    pub model: String,
    pub api_url: String,
    pub api_key: String,
    pub dimensions: Option<u32>,
}

fn str_field(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or("").to_string()
}

fn section_credentials(config: &Value, section: &str) -> ProviderCredentials {
    let section = config.get(section);

    let provider = section
        .and_then(|s| s.get("provider"))
        .and_then(Value::as_str)
        .unwrap_or("openai")
        .to_string();

    let model = expand_env_vars(&str_field(section.and_then(|s| s.get("model"))));

    let provider_config = section
        .and_then(|s| s.get("providers"))
        .and_then(|p| p.get(provider.as_str()));

    let api_url = expand_env_vars(&str_field(provider_config.and_then(|p| p.get("api_url"))));
    let api_key = expand_env_vars(&str_field(provider_config.and_then(|p| p.get("api_key"))));

    // dimensions may live on the provider entry or the section itself
    let dimensions = provider_config
        .and_then(|p| p.get("dimensions"))
        .or_else(|| section.and_then(|s| s.get("dimensions")))
        .and_then(Value::as_u64)
        .map(|d| d as u32);

    ProviderCredentials {
        provider,
        model,
        api_url,
        api_key,
        dimensions,
    }
}

/// Extract and expand the active LLM provider configuration
pub fn llm_credentials(config: &Value) -> ProviderCredentials {
    section_credentials(config, "llm")
}

/// Extract and expand the active embedder provider configuration.
/// Dimensions default to 768 when not configured.
pub fn embedder_credentials(config: &Value) -> ProviderCredentials {
    let mut creds = section_credentials(config, "embedder");
    creds.dimensions = creds.dimensions.or(Some(768));
    creds
}

/// Mask literal api_key values in the provider tables.
///
/// Unexpanded `${...}` template references pass through unmasked so the UI
/// can show which environment variable is wired in.
pub fn mask_config(config: &mut Value) {
    for section in ["llm", "embedder"] {
        let providers = config
            .get_mut(section)
            .and_then(|s| s.get_mut("providers"))
            .and_then(Value::as_mapping_mut);

        let Some(providers) = providers else {
            continue;
        };

        for provider in providers.values_mut() {
            let is_template = provider
                .get("api_key")
                .and_then(Value::as_str)
                .is_some_and(|key| key.starts_with("${"));

            if let Some(mapping) = provider.as_mapping_mut() {
                let key = Value::String("api_key".to_string());
                if mapping.contains_key(&key) && !is_template {
                    mapping.insert(key, Value::String("***".to_string()));
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    const SAMPLE: &str = r#"
llm:
  provider: ollama
  model: "${LLM_MODEL:llama3}"
  providers:
    ollama:
      api_url: "${OLLAMA_URL:http://ollama:11434/v1}"
      api_key: ""
    openai:
      api_url: https://api.openai.com/v1
      api_key: sk-live-secret
embedder:
  provider: openai
  model: text-embedding-3-small
  providers:
    openai:
      api_url: https://api.openai.com/v1
      api_key: "${OPENAI_API_KEY}"
      dimensions: 1536
"#;

    fn sample() -> Value {
        serde_yaml::from_str(SAMPLE).unwrap()
    }

    #[test]
    #[serial]
    fn test_expand_with_default() {
        std::env::remove_var("HOST");
        assert_eq!(expand_env_vars("${HOST:localhost}"), "localhost");

        std::env::set_var("HOST", "db");
        assert_eq!(expand_env_vars("${HOST:localhost}"), "db");
        std::env::remove_var("HOST");
    }

    #[test]
    #[serial]
    fn test_expand_unset_without_default() {
        std::env::remove_var("MISSING_VAR");
        assert_eq!(expand_env_vars("prefix-${MISSING_VAR}-suffix"), "prefix--suffix");
    }

    #[test]
    #[serial]
    fn test_expand_leaves_plain_strings_alone() {
        assert_eq!(expand_env_vars("http://ollama:11434"), "http://ollama:11434");
    }

    #[test]
    #[serial]
    fn test_llm_credentials() {
        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("OLLAMA_URL");

        let creds = llm_credentials(&sample());
        assert_eq!(creds.provider, "ollama");
        assert_eq!(creds.model, "llama3");
        assert_eq!(creds.api_url, "http://ollama:11434/v1");
        assert_eq!(creds.api_key, "");
    }

    #[test]
    #[serial]
    fn test_embedder_credentials_dimensions() {
        std::env::remove_var("OPENAI_API_KEY");

        let creds = embedder_credentials(&sample());
        assert_eq!(creds.provider, "openai");
        assert_eq!(creds.model, "text-embedding-3-small");
        assert_eq!(creds.dimensions, Some(1536));
    }

    #[test]
    fn test_embedder_dimensions_default() {
        let config: Value = serde_yaml::from_str("embedder:\n  provider: openai\n").unwrap();
        let creds = embedder_credentials(&config);
        assert_eq!(creds.dimensions, Some(768));
    }

    #[test]
    fn test_missing_sections_yield_defaults() {
        let creds = llm_credentials(&Value::Null);
        assert_eq!(creds.provider, "openai");
        assert_eq!(creds.api_url, "");
        assert_eq!(creds.model, "");
    }

    #[test]
    fn test_mask_literal_keys_only() {
        let mut config = sample();
        mask_config(&mut config);

        // Literal key is masked
        let openai_llm_key = config["llm"]["providers"]["openai"]["api_key"]
            .as_str()
            .unwrap();
        assert_eq!(openai_llm_key, "***");

        // Empty literal is masked too (not a template)
        let ollama_key = config["llm"]["providers"]["ollama"]["api_key"]
            .as_str()
            .unwrap();
        assert_eq!(ollama_key, "***");

        // Unexpanded template reference passes through
        let embedder_key = config["embedder"]["providers"]["openai"]["api_key"]
            .as_str()
            .unwrap();
        assert_eq!(embedder_key, "${OPENAI_API_KEY}");
    }
}
