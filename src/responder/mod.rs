//! Pattern-triggered replies to `/me` actions.

mod answer;
mod engine;
mod loader;
mod pattern;
mod properties;
mod registry;

pub use answer::{Answer, AnswerSet, SENDER_PLACEHOLDER};
pub use engine::ActionResponder;
pub use loader::{load_actions, parse_actions};
pub use pattern::{BOTNAME_PLACEHOLDER, TriggerPattern};
pub use properties::Properties;
pub use registry::PatternRegistry;
