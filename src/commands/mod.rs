use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

mod status_command;

pub use status_command::StatusCommand;

/// Result of command execution
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Successful reply, rendered with Telegram HTML formatting.
    Success(String),
    /// Failure reply, sent as plain text.
    Error(String),
}

/// Trait for command handlers - implement this to add new commands
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Get the command name (without prefix, e.g., "mcstatus" not "/mcstatus")
    fn name(&self) -> &str;

    /// Execute the command with given arguments
    async fn execute(&self, args: Vec<String>) -> CommandResult;

    /// Get help text for this command
    fn help(&self) -> String {
        format!("No help available for {}", self.name())
    }
}

/// Registry for managing command handlers
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: Arc<HashMap<String, Arc<dyn CommandHandler>>>,
}

impl CommandRegistry {
    /// Create a new empty command registry
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(HashMap::new()),
        }
    }

    /// Register a command handler
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) {
        let handlers = Arc::make_mut(&mut self.handlers);
        handlers.insert(handler.name().to_string(), handler);
    }

    /// Execute a command by name with arguments
    pub async fn execute(&self, command: &str, args: Vec<String>) -> Option<CommandResult> {
        match self.handlers.get(command) {
            Some(handler) => Some(handler.execute(args).await),
            None => None,
        }
    }

    /// Get help for a specific command
    pub fn get_help(&self, command: &str) -> Option<String> {
        self.handlers.get(command).map(|handler| handler.help())
    }

    /// List all registered commands, sorted by name
    pub fn list_commands(&self) -> Vec<String> {
        let mut commands: Vec<String> = self.handlers.keys().cloned().collect();
        commands.sort();
        commands
    }

    /// Check if a command exists
    pub fn has_command(&self, command: &str) -> bool {
        self.handlers.contains_key(command)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a command string into command name and arguments
/// Example: "/mcstatus now" -> ("mcstatus", vec!["now"])
pub fn parse_command(text: &str, prefix: &str) -> Option<(String, Vec<String>)> {
    let text = text.trim();

    if !text.starts_with(prefix) {
        return None;
    }

    let without_prefix = &text[prefix.len()..];
    let parts: Vec<&str> = without_prefix.split_whitespace().collect();

    if parts.is_empty() {
        return None;
    }

    // Telegram appends "@botname" to commands issued in group chats
    let command = match parts[0].split('@').next() {
        Some(command) if !command.is_empty() => command.to_lowercase(),
        _ => return None,
    };

    let args = parts[1..].iter().map(|s| s.to_string()).collect();

    Some((command, args))
}
