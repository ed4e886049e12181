use std::sync::Arc;

use mcbot::commands::{parse_command, CommandRegistry, CommandResult, StatusCommand};
use mcbot::config::{resolve_token, BotConfig};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{Message as TelegramMessage, ParseMode};
use teloxide::utils::html::escape;

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "bot.log";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging()?;

    tracing::info!("🤖 Starting mcbot...");

    let args: Vec<String> = std::env::args().collect();
    let token = match resolve_token(&args, std::env::var("TELEGRAM_BOT_TOKEN").ok()) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    let config = match BotConfig::load(CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Watching {} server {}",
        config.minecraft.edition,
        config.minecraft.server_address()
    );

    tracing::info!("Connecting to Telegram bot...");

    let bot = Bot::new(token);

    // Get bot info
    let me = bot.get_me().await?;
    let bot_username = me.username.clone().unwrap_or_else(|| "unknown".to_string());

    tracing::info!("✅ Bot connected: @{}", bot_username);

    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(StatusCommand::new(config.minecraft.clone())));

    tracing::info!(
        "🚀 Bot @{} is ready! Listening for commands...",
        bot_username
    );
    tracing::info!(
        "💡 Available commands: {}",
        registry
            .list_commands()
            .iter()
            .map(|c| format!("{}{}", config.commands.prefix, c))
            .collect::<Vec<_>>()
            .join(", ")
    );

    run_bot_loop(bot, config, registry).await?;

    tracing::info!("👋 Shutting down...");
    Ok(())
}

/// Append timestamped log lines to the bot's log file.
fn init_logging() -> std::io::Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)?;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();

    Ok(())
}

async fn run_bot_loop(
    bot: Bot,
    config: BotConfig,
    registry: CommandRegistry,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Arc::new(config);

    let handler = Update::filter_message().endpoint(move |bot: Bot, msg: TelegramMessage| {
        let config = config.clone();
        let registry = registry.clone();

        async move {
            if let Err(e) = handle_message(&bot, &config, &registry, msg).await {
                tracing::error!("Error handling message: {}", e);
            }
            respond(())
        }
    });

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_message(
    bot: &Bot,
    config: &BotConfig,
    registry: &CommandRegistry,
    msg: TelegramMessage,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let text = match msg.text() {
        Some(text) => text,
        None => return Ok(()),
    };

    let (command, args) = match parse_command(text, &config.commands.prefix) {
        Some(parsed) => parsed,
        None => {
            // Not a command, stay quiet
            tracing::debug!("Ignoring non-command message");
            return Ok(());
        }
    };

    tracing::info!("🎯 Executing command: {} {:?}", command, args);

    match registry.execute(&command, args).await {
        Some(CommandResult::Success(reply)) => {
            let reply = match msg.from() {
                Some(user) => format!(
                    "{}\n\n<i>Requested by {}</i>",
                    reply,
                    escape(&user.full_name())
                ),
                None => reply,
            };

            bot.send_message(msg.chat.id, reply)
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Some(CommandResult::Error(reply)) => {
            bot.send_message(msg.chat.id, reply).await?;
        }
        None => {
            let commands = registry
                .list_commands()
                .iter()
                .map(|c| format!("{}{}", config.commands.prefix, c))
                .collect::<Vec<_>>()
                .join("\n");
            let reply = format!(
                "❌ Unknown command: {}\nAvailable commands:\n{}",
                command, commands
            );

            bot.send_message(msg.chat.id, reply).await?;
        }
    }

    Ok(())
}
