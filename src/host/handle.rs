//! Handle through which modules observe the client state and talk to the
//! server.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLockReadGuard;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::proto::{Message, ctcp};
use crate::state::{ClientState, SharedState};

/// Sending half of the outbound queue.
pub type Outbox = mpsc::UnboundedSender<Message>;

/// Receiving half, drained by the active session.
pub type OutboxReceiver = mpsc::UnboundedReceiver<Message>;

/// Cheap to clone; one instance is shared by the event path and every
/// module task for the whole life of the host.
#[derive(Clone)]
pub struct BotHandle {
    state: SharedState,
    outbox: Outbox,
    quit_requested: Arc<AtomicBool>,
}

impl BotHandle {
    pub fn new(state: SharedState, outbox: Outbox) -> Self {
        Self {
            state,
            outbox,
            quit_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Our current nickname.
    pub fn nick(&self) -> String {
        self.state.read().nick().to_owned()
    }

    /// Read access to the roster. Do not hold the guard across awaits.
    pub fn state(&self) -> RwLockReadGuard<'_, ClientState> {
        self.state.read()
    }

    pub fn shared_state(&self) -> &SharedState {
        &self.state
    }

    pub fn channels(&self) -> Vec<String> {
        self.state.read().channel_names()
    }

    /// Operator on any joined channel.
    pub fn is_user_op(&self, nick: &str) -> bool {
        self.state.read().is_user_op(nick)
    }

    pub fn is_op_in(&self, channel: &str, nick: &str) -> bool {
        self.state.read().is_op_in(channel, nick)
    }

    /// Queues a raw message.
    pub fn send(&self, message: Message) {
        if let Err(e) = self.outbox.send(message) {
            debug!(command = %e.0.command, "Outbox closed, dropping message");
        }
    }

    pub fn send_message(&self, target: &str, text: &str) {
        self.send(Message::privmsg(target, text));
    }

    /// Narrated third-person line (`/me`).
    pub fn send_action(&self, target: &str, text: &str) {
        self.send(Message::privmsg(target, &ctcp::action(text)));
    }

    pub fn send_notice(&self, target: &str, text: &str) {
        self.send(Message::notice(target, text));
    }

    pub fn kick(&self, channel: &str, nick: &str, reason: &str) {
        self.send(Message::new(
            "KICK",
            vec![channel.to_owned(), nick.to_owned(), reason.to_owned()],
        ));
    }

    pub fn join(&self, channel: &str) {
        self.send(Message::new("JOIN", vec![channel.to_owned()]));
    }

    pub fn part(&self, channel: &str) {
        self.send(Message::new("PART", vec![channel.to_owned()]));
    }

    pub fn change_nick(&self, nick: &str) {
        self.send(Message::nick(nick));
    }

    /// Requested disconnect: the next disconnect runs the shutdown protocol
    /// instead of reconnecting.
    pub fn quit(&self, reason: &str) {
        info!(reason = %reason, "Quit requested");
        self.quit_requested.store(true, Ordering::SeqCst);
        self.send(Message::new("QUIT", vec![reason.to_owned()]));
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested.load(Ordering::SeqCst)
    }
}
