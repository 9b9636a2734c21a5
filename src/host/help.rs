//! Help listing derived from the installed modules.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use super::module::Module;

/// Commands are assumed to fit in this many columns.
const TRIGGER_COLUMN_WIDTH: usize = 20;

fn help_line(trigger: &str, help: Option<&str>) -> String {
    match help.filter(|h| !h.trim().is_empty()) {
        Some(help) => format!("{trigger:<width$}{help}", width = TRIGGER_COLUMN_WIDTH),
        None => trigger.to_owned(),
    }
}

fn insert_entry(entries: &mut BTreeMap<String, String>, key: String, line: String, module: &str) {
    if entries.contains_key(&key) {
        warn!(trigger = %key, module = %module, "Duplicate help trigger, keeping the last one");
    }
    entries.insert(key, line);
}

/// Builds the sorted help listing.
///
/// Public listings show every `!word` command. Private listings show the
/// private phrases the requester may use; `is_op` is only evaluated for the
/// private flavor. The intro line, when set and not blank, comes first.
pub fn build_help(
    modules: &[Arc<dyn Module>],
    intro: Option<&str>,
    in_private: bool,
    is_op: impl FnOnce() -> bool,
) -> Vec<String> {
    let mut help = Vec::new();
    if let Some(intro) = intro.filter(|i| !i.trim().is_empty()) {
        help.push(intro.to_owned());
    }

    let mut entries = BTreeMap::new();
    if !in_private {
        for module in modules {
            if let Some(public) = module.public_trigger() {
                let trigger = format!("!{}", public.trigger_word());
                let line = help_line(&trigger, public.help());
                insert_entry(&mut entries, trigger, line, module.name());
            }
        }
    } else {
        let is_op = is_op();
        for module in modules {
            let Some(private) = module.private_trigger() else {
                continue;
            };
            if private.op_required() && !is_op {
                continue;
            }
            let trigger = private.trigger_phrase().to_owned();
            let public_help = module.public_trigger().and_then(|p| p.help());
            let line = help_line(&trigger, public_help);
            insert_entry(&mut entries, trigger, line, module.name());
        }
    }

    help.extend(entries.into_values());
    help
}
