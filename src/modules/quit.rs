//! Private command asking the bot to leave the network for good.

use tracing::info;

use crate::config::QuitConfig;
use crate::host::{BotHandle, Module, PrivateTrigger, User};

pub struct Quit {
    phrase: String,
    message: String,
    op_required: bool,
}

impl Quit {
    pub fn new(config: &QuitConfig) -> Self {
        Self {
            phrase: config.phrase.clone(),
            message: config.message.clone(),
            op_required: config.op_required,
        }
    }
}

impl Module for Quit {
    fn name(&self) -> &str {
        "quit"
    }

    fn private_trigger(&self) -> Option<&dyn PrivateTrigger> {
        Some(self)
    }
}

impl PrivateTrigger for Quit {
    fn trigger_phrase(&self) -> &str {
        &self.phrase
    }

    fn op_required(&self) -> bool {
        self.op_required
    }

    fn on_trigger(&self, bot: &BotHandle, sender: &User, _message: &str) {
        info!(nick = %sender.nick, "Quit requested");
        bot.quit(&self.message);
    }
}
