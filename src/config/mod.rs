pub mod bot_config;

pub use bot_config::{resolve_token, BotConfig, CommandConfig, Edition, McServerConfig};
