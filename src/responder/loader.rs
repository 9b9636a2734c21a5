//! Builds a [`PatternRegistry`] from an actions properties file.
//!
//! ```text
//! poke.triggermessages.1=^pokes {botname}$
//! poke.triggermessages.2=^sends a poke to {botname}$
//! poke.probability=100
//! poke.possibleanswers.private.1=Hey!
//! poke.possibleanswers.action.1=giggles
//! poke.possibleanswers.action.2=pokes {sender} harder!
//! ```

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use super::answer::AnswerSet;
use super::pattern::TriggerPattern;
use super::properties::Properties;
use super::registry::PatternRegistry;
use crate::error::LoadError;

pub fn load_actions(path: &Path) -> Result<PatternRegistry, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let registry = parse_actions(&text);
    info!(path = %path.display(), triggers = registry.len(), "Loaded actions");
    Ok(registry)
}

pub fn parse_actions(text: &str) -> PatternRegistry {
    let properties = Properties::parse(text);
    let mut registry = PatternRegistry::new();

    let identifiers: BTreeSet<&str> = properties
        .keys()
        .filter_map(|key| key.split_once('.').map(|(id, _)| id))
        .collect();

    for id in identifiers {
        let triggers = properties.numbered(&format!("{id}.triggermessages"));
        if triggers.is_empty() {
            warn!(id = %id, "Action set has no trigger message, ignoring it");
            continue;
        }

        let answers = Arc::new(AnswerSet::new(
            probability(&properties, id),
            &properties.numbered(&format!("{id}.possibleanswers.private")),
            &properties.numbered(&format!("{id}.possibleanswers.action")),
        ));

        for trigger in triggers {
            match TriggerPattern::build(&trigger) {
                Ok(pattern) => registry.register(pattern, Arc::clone(&answers)),
                Err(e) => warn!(id = %id, trigger = %trigger, error = %e, "Invalid trigger, skipping it"),
            }
        }
    }

    registry
}

fn probability(properties: &Properties, id: &str) -> i64 {
    let key = format!("{id}.probability");
    match properties.get(&key).map(|raw| raw.trim().parse::<i64>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            warn!(key = %key, "Invalid probability, using 0");
            0
        }
        None => {
            warn!(key = %key, "Missing probability, using 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const POKE: &str = "\
poke.triggermessages.1=^pokes {botname}$
poke.triggermessages.2=^sends a poke to {botname}$
poke.probability=100
poke.possibleanswers.private.1=Hey!
poke.possibleanswers.action.1=giggles
poke.possibleanswers.action.2=pokes {sender} harder!
";

    #[test]
    fn both_triggers_share_one_answer_set() {
        let registry = parse_actions(POKE);
        assert_eq!(registry.len(), 2);

        registry.resolve_bot_name("Bob");
        let first: Vec<_> = registry.matching("pokes Bob").collect();
        let second: Vec<_> = registry.matching("sends a poke to Bob").collect();
        assert!(Arc::ptr_eq(first[0], second[0]));
        assert_eq!(first[0].probability(), 100);
        assert_eq!(first[0].answers().len(), 3);
    }

    #[test]
    fn missing_or_invalid_probability_is_zero() {
        let registry = parse_actions(
            "a.triggermessages.1=^a$\nb.triggermessages.1=^b$\nb.probability=often\n",
        );
        assert_eq!(registry.matching("a").next().map(|s| s.probability()), Some(0));
        assert_eq!(registry.matching("b").next().map(|s| s.probability()), Some(0));
    }

    #[test]
    fn invalid_trigger_is_skipped() {
        let registry = parse_actions(
            "x.triggermessages.1=^(broken$\nx.triggermessages.2=^fine$\nx.probability=50\n",
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.matching("fine").count(), 1);
    }

    #[test]
    fn numbering_gap_ends_the_trigger_list() {
        let registry = parse_actions(
            "x.triggermessages.1=^one$\nx.triggermessages.3=^three$\nx.probability=50\n",
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.matching("three").count(), 0);
    }

    #[test]
    fn keys_without_identifier_are_ignored() {
        let registry = parse_actions("orphan=1\n");
        assert!(registry.is_empty());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(POKE.as_bytes()).unwrap();
        let registry = load_actions(file.path()).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_actions(Path::new("/nonexistent/actions.properties")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/actions.properties"));
    }
}
