//! Shared application state.
//!
//! All clients are constructed once at startup and handed to request
//! handlers by cloning cheap handles; nothing here is a global singleton.

use std::sync::Arc;

use crate::auth::JwtManager;
use crate::config::Settings;
use crate::mcp::McpClient;
use crate::probe::ModelProbe;
use crate::queue::QueueMonitor;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub jwt: JwtManager,
    pub mcp: McpClient,
    pub queue: QueueMonitor,
    pub probe: ModelProbe,
}

impl AppState {
    pub fn new(config: Settings) -> anyhow::Result<Self> {
        let secret = config.secret_key()?;
        let jwt = JwtManager::new(&secret, config.jwt_expire_minutes);
        let mcp = McpClient::new(&config.mcp_url);
        let queue = QueueMonitor::new(&config.redis_url())?;
        let probe = ModelProbe::new();

        Ok(Self {
            config: Arc::new(config),
            jwt,
            mcp,
            queue,
            probe,
        })
    }
}
