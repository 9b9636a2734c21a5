//! Modules shipped with the bot.

mod announcer;
mod autojoin;
mod badwords;
mod quit;
mod uptime;

use std::sync::Arc;

use tracing::info;

pub use announcer::Announcer;
pub use autojoin::AutoJoin;
pub use badwords::{BadWords, load_word_list, parse_word_list};
pub use quit::Quit;
pub use uptime::{Uptime, format_uptime};

use crate::config::ModulesConfig;
use crate::host::{BotHost, Module};
use crate::network::Connector;
use crate::responder::ActionResponder;

/// Builds every module with a configuration table and installs it on `host`.
pub fn install<C: Connector>(config: &ModulesConfig, host: &mut BotHost<C>) {
    for module in build(config) {
        info!(module = %module.name(), "Installing module");
        host.add_module(module);
    }
}

/// Modules in installation order.
pub fn build(config: &ModulesConfig) -> Vec<Arc<dyn Module>> {
    let mut modules: Vec<Arc<dyn Module>> = Vec::new();
    if let Some(autojoin) = &config.autojoin {
        modules.push(Arc::new(AutoJoin::new(autojoin)));
    }
    if let Some(badwords) = &config.badwords {
        modules.push(Arc::new(BadWords::from_config(badwords)));
    }
    if let Some(actions) = &config.actions {
        modules.push(Arc::new(ActionResponder::from_config(actions)));
    }
    if let Some(uptime) = &config.uptime {
        modules.push(Arc::new(Uptime::new(uptime)));
    }
    if let Some(quit) = &config.quit {
        modules.push(Arc::new(Quit::new(quit)));
    }
    if let Some(announcer) = &config.announcer {
        modules.push(Arc::new(Announcer::new(announcer)));
    }
    modules
}
