//! The bot host: module contract, event dispatch, help and lifecycle.

mod dispatch;
mod event;
mod handle;
pub mod help;
mod lifecycle;
mod module;

pub use dispatch::{Dispatcher, HelpSettings};
pub use event::{Event, User};
pub use handle::{BotHandle, Outbox, OutboxReceiver};
pub use lifecycle::{BotHost, HostSettings, LinkState, SHUTDOWN_CHECK_INTERVAL, SHUTDOWN_CHECKS};
pub use module::{Module, PrivateTrigger, PublicTrigger, Runnable, Stoppable};
