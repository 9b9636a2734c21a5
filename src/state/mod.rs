//! Client state shared between the session, the event path and module tasks.

mod channel;
mod client;

pub use channel::{Channel, ChannelUser, MemberModes};
pub use client::ClientState;

use parking_lot::RwLock;
use std::sync::Arc;

/// Handle to the client state; written by the session, read everywhere else.
pub type SharedState = Arc<RwLock<ClientState>>;

pub fn shared(nick: &str) -> SharedState {
    Arc::new(RwLock::new(ClientState::new(nick)))
}
