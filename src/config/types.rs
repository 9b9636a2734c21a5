//! Core configuration types and loading.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::defaults::{
    default_help_trigger, default_realname, default_registration_timeout, default_retry_delay_ms,
};
use super::modules::ModulesConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bot identity and host behavior.
    pub bot: BotConfig,
    /// Explicit endpoint list, tried in order.
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    /// Single host with several ports, appended after `endpoints`.
    pub server: Option<ServerConfig>,
    /// Bundled modules; a module is enabled when its table is present.
    #[serde(default)]
    pub modules: ModulesConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// The full round-robin endpoint list.
    pub fn endpoint_list(&self) -> Vec<Endpoint> {
        let mut list = self.endpoints.clone();
        if let Some(ref server) = self.server {
            list.extend(server.ports.iter().map(|&port| Endpoint {
                host: server.host.clone(),
                port,
            }));
        }
        list
    }
}

/// Bot identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Nickname requested at registration.
    pub nick: String,
    /// Username (ident); defaults to the nickname.
    pub username: Option<String>,
    /// Real name (gecos).
    #[serde(default = "default_realname")]
    pub realname: String,
    /// Server password sent with PASS (optional).
    pub password: Option<String>,
    /// Line shown at the top of every help listing.
    pub help_intro: Option<String>,
    /// Help command word; empty disables the built-in help command.
    #[serde(default = "default_help_trigger")]
    pub help_trigger: Option<String>,
    /// Pause between two failed connection attempts, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Seconds allowed for the server to accept our registration.
    #[serde(default = "default_registration_timeout")]
    pub registration_timeout_secs: u64,
}

impl BotConfig {
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.nick)
    }

    /// Help command word, `None` when disabled.
    pub fn help_trigger(&self) -> Option<&str> {
        self.help_trigger.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn registration_timeout(&self) -> Duration {
        Duration::from_secs(self.registration_timeout_secs)
    }
}

/// One connection candidate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_owned(),
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Legacy single-host form: one host, several ports.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    #[serde(default)]
    pub ports: Vec<u16>,
}
