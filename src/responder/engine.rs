//! The `ActionResponder` module: answers `/me` actions matching a trigger.

use std::path::Path;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error};

use super::loader::load_actions;
use super::registry::PatternRegistry;
use crate::config::ActionsConfig;
use crate::host::{BotHandle, Module, User};
use crate::proto::is_channel_name;

pub struct ActionResponder {
    registry: PatternRegistry,
    rng: Mutex<StdRng>,
}

impl ActionResponder {
    pub fn new(registry: PatternRegistry) -> Self {
        Self {
            registry,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic draws, for reproducible tests.
    pub fn with_seed(registry: PatternRegistry, seed: u64) -> Self {
        Self {
            registry,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// An unreadable file leaves the responder without triggers.
    pub fn from_config(config: &ActionsConfig) -> Self {
        let registry = load_actions(Path::new(&config.path)).unwrap_or_else(|e| {
            error!(error = %e, "Could not load actions file, they will not be available");
            PatternRegistry::new()
        });
        match config.seed {
            Some(seed) => Self::with_seed(registry, seed),
            None => Self::new(registry),
        }
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }
}

impl Module for ActionResponder {
    fn name(&self) -> &str {
        "actions"
    }

    fn on_connect(&self, bot: &BotHandle) {
        self.registry.resolve_bot_name(&bot.nick());
    }

    fn on_nick_change(&self, bot: &BotHandle, _sender: &User, new_nick: &str) {
        // The state already follows the rename when the event reaches us.
        if new_nick == bot.nick() {
            self.registry.resolve_bot_name(new_nick);
        }
    }

    fn on_action(&self, bot: &BotHandle, sender: &User, target: &str, action: &str) {
        let reply_to = if is_channel_name(target) {
            target
        } else {
            sender.nick.as_str()
        };

        let mut rng = self.rng.lock();
        for answers in self.registry.matching(action) {
            if answers.answers().is_empty() {
                debug!(action = %action, "Matching trigger has no answer");
                continue;
            }
            let Some(answer) = answers.pick(&mut *rng) else {
                continue;
            };

            let line = answer.build(&sender.nick);
            if answer.is_action() {
                bot.send_action(reply_to, &line);
            } else {
                bot.send_message(reply_to, &line);
            }
        }
    }
}
