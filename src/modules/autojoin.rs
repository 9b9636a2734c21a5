//! Joins a fixed set of channels after every connect.

use tracing::info;

use crate::config::AutojoinConfig;
use crate::host::{BotHandle, Module};

pub struct AutoJoin {
    channels: Vec<String>,
}

impl AutoJoin {
    pub fn new(config: &AutojoinConfig) -> Self {
        Self {
            channels: config.channels.clone(),
        }
    }
}

impl Module for AutoJoin {
    fn name(&self) -> &str {
        "autojoin"
    }

    fn on_connect(&self, bot: &BotHandle) {
        for channel in &self.channels {
            info!(channel = %channel, "Joining");
            bot.join(channel);
        }
    }
}
