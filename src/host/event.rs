//! Typed inbound events delivered by the session.

use crate::proto::Prefix;

/// Origin of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub nick: String,
    pub login: String,
    pub hostname: String,
}

impl User {
    pub fn new(nick: &str, login: &str, hostname: &str) -> Self {
        Self {
            nick: nick.to_owned(),
            login: login.to_owned(),
            hostname: hostname.to_owned(),
        }
    }

    /// Servers are reported with their name as nick and empty login/host.
    pub fn from_prefix(prefix: &Prefix) -> Self {
        match prefix {
            Prefix::Nickname(nick, login, hostname) => Self::new(nick, login, hostname),
            Prefix::ServerName(name) => Self::new(name, "", ""),
        }
    }
}

/// Every inbound event kind fanned out to modules.
///
/// Connect and disconnect are not listed: they are raised by the lifecycle
/// manager, not by the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Topic {
        channel: String,
        topic: String,
        set_by: String,
        /// Milliseconds since the epoch.
        date: i64,
        /// False when the topic is reported on join rather than changed.
        changed: bool,
    },
    Message {
        channel: String,
        sender: User,
        text: String,
    },
    PrivateMessage {
        sender: User,
        text: String,
    },
    Action {
        sender: User,
        target: String,
        action: String,
    },
    ServerResponse {
        code: u16,
        response: String,
    },
    Join {
        channel: String,
        sender: User,
    },
    Part {
        channel: String,
        sender: User,
    },
    NickChange {
        sender: User,
        new_nick: String,
    },
    Quit {
        sender: User,
        reason: String,
    },
    Mode {
        channel: String,
        source: User,
        mode: String,
    },
    UserMode {
        target: String,
        source: User,
        mode: String,
    },
    Kick {
        channel: String,
        kicker: User,
        recipient: String,
        reason: String,
    },
}

impl Event {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Topic { .. } => "topic",
            Self::Message { .. } => "message",
            Self::PrivateMessage { .. } => "private_message",
            Self::Action { .. } => "action",
            Self::ServerResponse { .. } => "server_response",
            Self::Join { .. } => "join",
            Self::Part { .. } => "part",
            Self::NickChange { .. } => "nick_change",
            Self::Quit { .. } => "quit",
            Self::Mode { .. } => "mode",
            Self::UserMode { .. } => "user_mode",
            Self::Kick { .. } => "kick",
        }
    }
}
