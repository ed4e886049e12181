pub mod fetcher;

pub use fetcher::{PingSource, ServerStatus, StatusSource};

use teloxide::utils::html::escape;

use crate::config::McServerConfig;
use crate::util::errors::StatusError;

/// Render a successful status snapshot as a Telegram HTML message.
pub fn render_status(config: &McServerConfig, status: &ServerStatus) -> String {
    format!(
        "<b>🟢 Server is online</b>\n\n\
         <b>Address:</b> <code>{}</code>\n\
         <b>Port:</b> <code>{}</code>\n\
         <b>Players online:</b> <code>{}/{}</code>\n\
         <b>Version:</b> <code>{} ({})</code>\n\
         <b>Latency:</b> <code>{} ms</code>",
        escape(&config.server_host),
        config.server_port,
        status.players_online,
        status.players_max,
        escape(&status.version),
        config.edition,
        status.latency_ms,
    )
}

/// Render a failed status query as a plain text reply.
pub fn render_error(err: &StatusError) -> String {
    format!("⚠️ Failed to fetch server status:\n{}", err)
}
