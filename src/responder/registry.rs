//! Trigger patterns and the answer sets they map to.

use std::sync::Arc;

use tracing::{debug, warn};

use super::answer::AnswerSet;
use super::pattern::TriggerPattern;

#[derive(Debug, Default)]
pub struct PatternRegistry {
    entries: Vec<(TriggerPattern, Arc<AnswerSet>)>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, pattern: TriggerPattern, answers: Arc<AnswerSet>) {
        debug!(pattern = %pattern.as_str(), dynamic = pattern.is_dynamic(), "Registered trigger");
        self.entries.push((pattern, answers));
    }

    /// Recompiles every dynamic pattern for `name`.
    ///
    /// A pattern that no longer compiles keeps its previous matcher.
    pub fn resolve_bot_name(&self, name: &str) {
        for (pattern, _) in &self.entries {
            if let Err(e) = pattern.resolve(name) {
                warn!(pattern = %pattern.as_str(), name = %name, error = %e, "Could not resolve dynamic pattern");
            }
        }
    }

    /// Answer sets of every pattern matching `text`, in registration order.
    pub fn matching<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a Arc<AnswerSet>> + 'a {
        self.entries
            .iter()
            .filter(move |(pattern, _)| pattern.is_match(text))
            .map(|(_, answers)| answers)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
