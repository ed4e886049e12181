use async_trait::async_trait;
use std::sync::Arc;

use super::{CommandHandler, CommandResult};
use crate::config::McServerConfig;
use crate::status::{render_error, render_status, PingSource, StatusSource};

/// Status command - reports whether the watched server is up and how many
/// players are on it.
pub struct StatusCommand {
    config: McServerConfig,
    source: Arc<dyn StatusSource>,
}

impl StatusCommand {
    /// Create a status command that pings the configured server.
    pub fn new(config: McServerConfig) -> Self {
        let source = Arc::new(PingSource::new(config.clone()));
        Self { config, source }
    }

    /// Create a status command backed by a custom status source.
    pub fn with_source(config: McServerConfig, source: Arc<dyn StatusSource>) -> Self {
        Self { config, source }
    }
}

#[async_trait]
impl CommandHandler for StatusCommand {
    fn name(&self) -> &str {
        "mcstatus"
    }

    async fn execute(&self, _args: Vec<String>) -> CommandResult {
        tracing::debug!("Querying status of {}", self.config.server_address());

        match self.source.fetch().await {
            Ok(status) => {
                tracing::info!(
                    "Server {} is online with {}/{} players",
                    self.config.server_address(),
                    status.players_online,
                    status.players_max
                );
                CommandResult::Success(render_status(&self.config, &status))
            }
            Err(e) => {
                tracing::error!(
                    "Failed to fetch status of {}: {}",
                    self.config.server_address(),
                    e
                );
                CommandResult::Error(render_error(&e))
            }
        }
    }

    fn help(&self) -> String {
        "Show the online status and player count of the Minecraft server.\nUsage: /mcstatus"
            .to_string()
    }
}
