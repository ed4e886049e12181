use async_trait::async_trait;
use mcping::{Bedrock, Java};

use crate::config::{Edition, McServerConfig};
use crate::util::errors::StatusError;

/// One snapshot of a server's public status.
#[derive(Debug, Clone)]
pub struct ServerStatus {
    pub players_online: i64,
    pub players_max: i64,
    pub version: String,
    pub latency_ms: u64,
}

/// Trait for status backends - implement this to fetch status from
/// somewhere other than a live ping (tests do).
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self) -> Result<ServerStatus, StatusError>;
}

/// Status source backed by a real ping against the configured server.
pub struct PingSource {
    config: McServerConfig,
}

impl PingSource {
    pub fn new(config: McServerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl StatusSource for PingSource {
    /// Run a single status query with the configured timeout. No retries.
    async fn fetch(&self) -> Result<ServerStatus, StatusError> {
        let timeout = Some(self.config.query_timeout());

        match self.config.edition {
            Edition::Java => {
                let (latency_ms, response) = mcping::tokio::get_status(Java {
                    server_address: self.config.server_address(),
                    timeout,
                })
                .await?;

                Ok(ServerStatus {
                    players_online: response.players.online,
                    players_max: response.players.max,
                    version: response.version.name,
                    latency_ms,
                })
            }
            Edition::Bedrock => {
                let (latency_ms, response) = mcping::tokio::get_status(Bedrock {
                    server_address: self.config.server_address(),
                    timeout,
                    ..Default::default()
                })
                .await?;

                // Bedrock pongs are not guaranteed to carry player counts.
                let players_online = response.players_online.ok_or_else(|| {
                    StatusError::MalformedResponse("player count missing from pong".to_string())
                })?;
                let players_max = response.players_max.ok_or_else(|| {
                    StatusError::MalformedResponse("max player count missing from pong".to_string())
                })?;

                Ok(ServerStatus {
                    players_online,
                    players_max,
                    version: response.version_name,
                    latency_ms,
                })
            }
        }
    }
}
