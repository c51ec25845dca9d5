//! Application configuration

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rand::RngCore;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Settings {
    // Server
    pub bind_address: String,

    // Graphiti MCP server (entity types, graph health/stats)
    pub mcp_url: String,

    // Graph database
    pub graph_provider: String, // falkordb, neo4j, kuzu, neptune
    pub falkordb_host: String,
    pub falkordb_port: u16,
    pub falkordb_password: String,
    pub falkordb_database: String,
    pub falkordb_browser_url: String,

    // Mounted provider config document
    pub config_path: PathBuf,

    // Authentication
    pub admin_username: String,
    pub jwt_expire_minutes: i64,

    // Secret key - auto-generated and persisted next to the config file
    // when not supplied via SECRET_KEY
    secret_key: Option<String>,
}

impl Settings {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),

            mcp_url: env::var("GRAPHITI_MCP_URL")
                .unwrap_or_else(|_| "http://graphiti-mcp:8000".to_string()),

            graph_provider: env::var("GRAPH_PROVIDER").unwrap_or_else(|_| "falkordb".to_string()),
            falkordb_host: env::var("FALKORDB_HOST").unwrap_or_else(|_| "falkordb".to_string()),
            falkordb_port: env::var("FALKORDB_PORT")
                .unwrap_or_else(|_| "6379".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("FALKORDB_PORT"))?,
            falkordb_password: env::var("FALKORDB_PASSWORD").unwrap_or_default(),
            falkordb_database: env::var("FALKORDB_DATABASE")
                .unwrap_or_else(|_| "graphiti".to_string()),
            falkordb_browser_url: env::var("FALKORDB_BROWSER_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            config_path: env::var("CONFIG_PATH")
                .unwrap_or_else(|_| "/config/config.yaml".to_string())
                .into(),

            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            jwt_expire_minutes: env::var("JWT_EXPIRE_MINUTES")
                .unwrap_or_else(|_| "43200".to_string()) // 30 days
                .parse()
                .map_err(|_| ConfigError::Invalid("JWT_EXPIRE_MINUTES"))?,

            secret_key: env::var("SECRET_KEY").ok().filter(|k| !k.is_empty()),
        })
    }

    /// Redis connection URL derived from the FalkorDB settings.
    ///
    /// FalkorDB speaks the Redis protocol; the work queue streams live in the
    /// same instance.
    pub fn redis_url(&self) -> String {
        if self.falkordb_password.is_empty() {
            format!("redis://{}:{}/", self.falkordb_host, self.falkordb_port)
        } else {
            format!(
                "redis://:{}@{}:{}/",
                self.falkordb_password, self.falkordb_host, self.falkordb_port
            )
        }
    }

    /// Resolve the JWT signing secret.
    ///
    /// Order: `SECRET_KEY` env var, then a `.secret_key` file next to the
    /// config document. When neither exists a new key is generated and
    /// persisted so tokens survive restarts.
    pub fn secret_key(&self) -> Result<String, ConfigError> {
        if let Some(key) = &self.secret_key {
            return Ok(key.clone());
        }

        let secret_file = self
            .config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(".secret_key");

        if secret_file.exists() {
            let key = fs::read_to_string(&secret_file)?;
            return Ok(key.trim().to_string());
        }

        let mut bytes = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        let key = hex::encode(bytes);

        if let Some(parent) = secret_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&secret_file, &key)?;
        tracing::info!(path = %secret_file.display(), "Generated new secret key");

        Ok(key)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
    #[error("Failed to read or persist secret key: {0}")]
    SecretKey(#[from] std::io::Error),
}
