//! Settings for the bundled modules.

use serde::Deserialize;

use super::defaults::{
    default_announce_interval, default_quit_message, default_quit_phrase, default_true,
    default_uptime_trigger,
};

/// Module tables; a missing table leaves the module out.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModulesConfig {
    pub autojoin: Option<AutojoinConfig>,
    pub badwords: Option<BadwordsConfig>,
    pub actions: Option<ActionsConfig>,
    pub uptime: Option<UptimeConfig>,
    pub quit: Option<QuitConfig>,
    pub announcer: Option<AnnouncerConfig>,
}

/// Channels joined after every successful connect.
#[derive(Debug, Clone, Deserialize)]
pub struct AutojoinConfig {
    #[serde(default)]
    pub channels: Vec<String>,
}

/// Kick users saying a listed word.
#[derive(Debug, Clone, Deserialize)]
pub struct BadwordsConfig {
    /// Word list file, one word per line, `#` comments.
    pub path: String,
    pub kick_reason: String,
}

/// Pattern-triggered replies to actions.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionsConfig {
    /// Key/value actions file.
    pub path: String,
    /// Fixed RNG seed, for reproducible replies.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UptimeConfig {
    #[serde(default = "default_uptime_trigger")]
    pub trigger: String,
}

/// Private command that makes the bot quit.
#[derive(Debug, Clone, Deserialize)]
pub struct QuitConfig {
    #[serde(default = "default_quit_phrase")]
    pub phrase: String,
    #[serde(default = "default_quit_message")]
    pub message: String,
    #[serde(default = "default_true")]
    pub op_required: bool,
}

/// Periodic announcements.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnouncerConfig {
    /// Target channels; empty means every joined channel.
    #[serde(default)]
    pub channels: Vec<String>,
    pub lines: Vec<String>,
    #[serde(default = "default_announce_interval")]
    pub interval_secs: u64,
}
