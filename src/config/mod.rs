//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config structs (Config, BotConfig, Endpoint, ServerConfig)
//! - [`modules`]: Per-module settings for the bundled modules
//! - [`defaults`]: serde default value functions
//! - [`validation`]: Startup validation

mod defaults;
mod modules;
mod types;
pub mod validation;

pub use modules::{
    ActionsConfig, AnnouncerConfig, AutojoinConfig, BadwordsConfig, ModulesConfig, QuitConfig,
    UptimeConfig,
};
pub use types::{BotConfig, Config, ConfigError, Endpoint, ServerConfig};
pub use validation::{ValidationError, validate};
