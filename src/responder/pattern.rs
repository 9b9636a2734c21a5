//! Trigger patterns: plain regexes, or regexes naming the bot.

use parking_lot::RwLock;
use regex::Regex;
use tracing::debug;

/// Placeholder replaced by the bot's current nickname.
pub const BOTNAME_PLACEHOLDER: &str = "{botname}";

/// A compiled trigger.
///
/// Dynamic patterns are recompiled whenever the bot's name changes and
/// match nothing until the first resolution.
#[derive(Debug)]
pub enum TriggerPattern {
    Static(Regex),
    Dynamic(DynamicPattern),
}

#[derive(Debug)]
pub struct DynamicPattern {
    template: String,
    // Written on connect and nick change, read on every action.
    resolved: RwLock<Option<Regex>>,
}

impl TriggerPattern {
    /// Compiles `text`, which may contain [`BOTNAME_PLACEHOLDER`].
    ///
    /// Dynamic templates are test-compiled with a sample name so that a
    /// broken regex is reported at load time rather than on connect.
    pub fn build(text: &str) -> Result<Self, regex::Error> {
        if text.contains(BOTNAME_PLACEHOLDER) {
            Regex::new(&substitute(text, "bot"))?;
            Ok(Self::Dynamic(DynamicPattern {
                template: text.to_owned(),
                resolved: RwLock::new(None),
            }))
        } else {
            Ok(Self::Static(Regex::new(text)?))
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }

    /// Source text as written in the configuration.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(regex) => regex.as_str(),
            Self::Dynamic(dynamic) => &dynamic.template,
        }
    }

    /// Regex search on the verbatim text.
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Static(regex) => regex.is_match(text),
            Self::Dynamic(dynamic) => dynamic
                .resolved
                .read()
                .as_ref()
                .is_some_and(|regex| regex.is_match(text)),
        }
    }

    /// Recompiles a dynamic pattern for `bot_name`; static patterns ignore it.
    pub fn resolve(&self, bot_name: &str) -> Result<(), regex::Error> {
        if let Self::Dynamic(dynamic) = self {
            let regex = Regex::new(&substitute(&dynamic.template, bot_name))?;
            debug!(pattern = %regex.as_str(), "Dynamic pattern resolved");
            *dynamic.resolved.write() = Some(regex);
        }
        Ok(())
    }
}

/// Nicknames may contain regex metacharacters (`[]\^{}|`).
fn substitute(template: &str, bot_name: &str) -> String {
    template.replace(BOTNAME_PLACEHOLDER, &regex::escape(bot_name))
}
