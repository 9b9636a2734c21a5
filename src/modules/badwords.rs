//! Kicks users who use a forbidden word on a channel.
//!
//! Words are matched on whole-word boundaries: both the list entries and the
//! message are lower-cased and padded with a space on each side, so `idiot`
//! catches "you are an idiot" but not "idiotic".

use std::path::Path;

use aho_corasick::AhoCorasick;
use tracing::{debug, error, info, warn};

use crate::config::BadwordsConfig;
use crate::error::LoadError;
use crate::host::{BotHandle, Module, User};

pub struct BadWords {
    matcher: Option<AhoCorasick>,
    kick_reason: String,
}

impl BadWords {
    pub fn new(words: &[String], kick_reason: &str) -> Self {
        let matcher = if words.is_empty() {
            None
        } else {
            match AhoCorasick::new(words) {
                Ok(matcher) => Some(matcher),
                Err(err) => {
                    warn!(error = ?err, "Failed to build bad words matcher; module disabled");
                    None
                }
            }
        };
        Self {
            matcher,
            kick_reason: kick_reason.to_owned(),
        }
    }

    /// An unreadable list leaves the module inert.
    pub fn from_config(config: &BadwordsConfig) -> Self {
        let words = load_word_list(Path::new(&config.path)).unwrap_or_else(|e| {
            error!(error = %e, "Could not read bad words file, ignoring");
            Vec::new()
        });
        Self::new(&words, &config.kick_reason)
    }

    pub fn is_offensive(&self, message: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|m| m.is_match(&pad(message)))
    }
}

fn pad(text: &str) -> String {
    format!(" {} ", text.to_lowercase())
}

/// One word per line; blank lines and `#` comments are skipped.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(pad)
        .collect()
}

pub fn load_word_list(path: &Path) -> Result<Vec<String>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let words = parse_word_list(&text);
    info!(path = %path.display(), words = words.len(), "Loaded bad words");
    Ok(words)
}

impl Module for BadWords {
    fn name(&self) -> &str {
        "badwords"
    }

    fn on_message(&self, bot: &BotHandle, channel: &str, sender: &User, message: &str) {
        if bot.state().is_me(&sender.nick) || bot.is_op_in(channel, &sender.nick) {
            return;
        }
        if self.is_offensive(message) {
            debug!(channel = %channel, nick = %sender.nick, "Bad word spotted");
            bot.kick(channel, &sender.nick, &self.kick_reason);
        }
    }
}
