use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Minecraft edition the target server runs. Selects the ping flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    Java,
    Bedrock,
}

impl Default for Edition {
    fn default() -> Self {
        Edition::Java
    }
}

impl FromStr for Edition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "java" => Ok(Edition::Java),
            "bedrock" => Ok(Edition::Bedrock),
            other => Err(format!(
                "Unknown Minecraft edition '{}'. Expected 'java' or 'bedrock'",
                other
            )),
        }
    }
}

impl std::fmt::Display for Edition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edition::Java => write!(f, "Java"),
            Edition::Bedrock => write!(f, "Bedrock"),
        }
    }
}

/// Settings describing the Minecraft server the bot watches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McServerConfig {
    pub server_host: String,
    pub server_port: u16,
    #[serde(default)]
    pub edition: Edition,
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

impl McServerConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    /// The `host:port` string the ping library expects.
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn default_query_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

fn default_prefix() -> String {
    "/".to_string()
}

/// Bot configuration as it appears on disk. Minecraft settings are
/// optional here because each of them may come from the environment
/// instead.
#[derive(Debug, Default, Deserialize)]
struct RawBotConfig {
    #[serde(default)]
    minecraft: RawMcSection,
    #[serde(default)]
    commands: CommandConfig,
}

#[derive(Debug, Default, Deserialize)]
struct RawMcSection {
    server_host: Option<String>,
    server_port: Option<u16>,
    edition: Option<Edition>,
    query_timeout_secs: Option<u64>,
}

/// Environment fallbacks for the Minecraft settings.
#[derive(Debug, Default)]
struct EnvOverrides {
    host: Option<String>,
    port: Option<String>,
    edition: Option<String>,
}

impl EnvOverrides {
    fn capture() -> Self {
        Self {
            host: std::env::var("MC_SERVER_HOST").ok(),
            port: std::env::var("MC_SERVER_PORT").ok(),
            edition: std::env::var("MC_SERVER_EDITION").ok(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub minecraft: McServerConfig,
    #[serde(default)]
    pub commands: CommandConfig,
}

impl BotConfig {
    /// Load bot configuration from a TOML file, filling missing Minecraft
    /// settings from the environment. A missing file is not an error; the
    /// environment alone can carry the whole configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let raw = match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse config file: {}", e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => RawBotConfig::default(),
            Err(e) => return Err(format!("Failed to read config file: {}", e)),
        };

        Self::from_raw(raw, EnvOverrides::capture())
    }

    fn from_raw(raw: RawBotConfig, env: EnvOverrides) -> Result<Self, String> {
        // File values win; the environment fills the gaps.
        let server_host = match raw.minecraft.server_host.or(env.host) {
            Some(host) if !host.trim().is_empty() => host,
            _ => {
                return Err(
                    "Minecraft server host not found. Set it in config.toml or as MC_SERVER_HOST"
                        .to_string(),
                )
            }
        };

        let server_port = match raw.minecraft.server_port {
            Some(port) => port,
            None => match env.port {
                Some(value) => value
                    .parse::<u16>()
                    .map_err(|e| format!("Invalid MC_SERVER_PORT value '{}': {}", value, e))?,
                None => {
                    return Err(
                        "Minecraft server port not found. Set it in config.toml or as MC_SERVER_PORT"
                            .to_string(),
                    )
                }
            },
        };

        if server_port == 0 {
            return Err("Minecraft server port must be a positive integer".to_string());
        }

        let edition = match raw.minecraft.edition {
            Some(edition) => edition,
            None => match env.edition {
                Some(value) => Edition::from_str(&value)?,
                None => Edition::default(),
            },
        };

        let commands = raw.commands;
        if commands.prefix.is_empty() {
            return Err("Command prefix cannot be empty".to_string());
        }

        Ok(Self {
            minecraft: McServerConfig {
                server_host,
                server_port,
                edition,
                query_timeout_secs: raw
                    .minecraft
                    .query_timeout_secs
                    .unwrap_or_else(default_query_timeout_secs),
            },
            commands,
        })
    }
}

/// Resolve the Telegram bot token from CLI arguments or the environment.
pub fn resolve_token(args: &[String], env_token: Option<String>) -> Result<String, String> {
    for arg in args.iter().skip(1) {
        if let Some(token) = arg.strip_prefix("--token=") {
            if token.is_empty() {
                return Err("Bot token cannot be empty".to_string());
            }
            return Ok(token.to_string());
        }
    }

    // Try environment variable as fallback
    if let Some(token) = env_token {
        if !token.is_empty() {
            return Ok(token);
        }
    }

    Err("Telegram bot token not found. Use: cargo run -- --token=YOUR_BOT_TOKEN\nOr set the TELEGRAM_BOT_TOKEN environment variable".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[minecraft]
server_host = "play.example.org"
server_port = 25565
edition = "bedrock"
query_timeout_secs = 5

[commands]
prefix = "!"
"#;

        let raw: RawBotConfig = toml::from_str(toml_str).unwrap();
        let config = BotConfig::from_raw(raw, EnvOverrides::default()).unwrap();

        assert_eq!(config.minecraft.server_host, "play.example.org");
        assert_eq!(config.minecraft.server_port, 25565);
        assert_eq!(config.minecraft.edition, Edition::Bedrock);
        assert_eq!(config.minecraft.query_timeout(), Duration::from_secs(5));
        assert_eq!(config.minecraft.server_address(), "play.example.org:25565");
        assert_eq!(config.commands.prefix, "!");
    }

    #[test]
    fn test_environment_fills_missing_settings() {
        let env = EnvOverrides {
            host: Some("play.example.org".to_string()),
            port: Some("19132".to_string()),
            edition: Some("bedrock".to_string()),
        };

        let config = BotConfig::from_raw(RawBotConfig::default(), env).unwrap();

        assert_eq!(config.minecraft.server_host, "play.example.org");
        assert_eq!(config.minecraft.server_port, 19132);
        assert_eq!(config.minecraft.edition, Edition::Bedrock);
        assert_eq!(config.minecraft.query_timeout_secs, 10);
        assert_eq!(config.commands.prefix, "/");
    }

    #[test]
    fn test_file_wins_over_environment() {
        let toml_str = r#"
[minecraft]
server_host = "from-file.example.org"
server_port = 25565
"#;

        let raw: RawBotConfig = toml::from_str(toml_str).unwrap();
        let env = EnvOverrides {
            host: Some("from-env.example.org".to_string()),
            port: Some("19132".to_string()),
            edition: None,
        };

        let config = BotConfig::from_raw(raw, env).unwrap();
        assert_eq!(config.minecraft.server_host, "from-file.example.org");
        assert_eq!(config.minecraft.server_port, 25565);
        assert_eq!(config.minecraft.edition, Edition::Java);
    }

    #[test]
    fn test_missing_host_and_port_fail() {
        let err = BotConfig::from_raw(RawBotConfig::default(), EnvOverrides::default())
            .unwrap_err();
        assert!(err.contains("host"));

        let env = EnvOverrides {
            host: Some("play.example.org".to_string()),
            port: None,
            edition: None,
        };
        let err = BotConfig::from_raw(RawBotConfig::default(), env).unwrap_err();
        assert!(err.contains("port"));
    }

    #[test]
    fn test_invalid_port_values_fail() {
        let env = EnvOverrides {
            host: Some("play.example.org".to_string()),
            port: Some("not-a-port".to_string()),
            edition: None,
        };
        let err = BotConfig::from_raw(RawBotConfig::default(), env).unwrap_err();
        assert!(err.contains("MC_SERVER_PORT"));

        let env = EnvOverrides {
            host: Some("play.example.org".to_string()),
            port: Some("0".to_string()),
            edition: None,
        };
        let err = BotConfig::from_raw(RawBotConfig::default(), env).unwrap_err();
        assert!(err.contains("positive"));
    }

    #[test]
    fn test_unknown_edition_fails() {
        let env = EnvOverrides {
            host: Some("play.example.org".to_string()),
            port: Some("25565".to_string()),
            edition: Some("pocket".to_string()),
        };
        let err = BotConfig::from_raw(RawBotConfig::default(), env).unwrap_err();
        assert!(err.contains("edition"));
    }

    #[test]
    fn test_resolve_token() {
        let args = vec!["mcbot".to_string(), "--token=abc123".to_string()];
        assert_eq!(resolve_token(&args, None).unwrap(), "abc123");

        // CLI argument wins over the environment
        assert_eq!(
            resolve_token(&args, Some("from-env".to_string())).unwrap(),
            "abc123"
        );

        let no_args = vec!["mcbot".to_string()];
        assert_eq!(
            resolve_token(&no_args, Some("from-env".to_string())).unwrap(),
            "from-env"
        );

        assert!(resolve_token(&no_args, None).is_err());
        assert!(resolve_token(&no_args, Some(String::new())).is_err());

        let empty = vec!["mcbot".to_string(), "--token=".to_string()];
        assert!(resolve_token(&empty, None).is_err());
    }
}
