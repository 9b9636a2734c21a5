//! Minimal IRC client-side protocol layer.
//!
//! Parsing and serialization of raw lines ([`Message`]), message origins
//! ([`Prefix`]) and CTCP ACTION framing ([`ctcp`]). Only what a bot needs
//! to talk to a server lives here; validation is left to the server.

pub mod ctcp;
mod message;
mod prefix;

pub use message::{Message, ParseError};
pub use prefix::Prefix;

/// Numeric replies the client reacts to.
pub mod numeric {
    pub const RPL_WELCOME: u16 = 1;
    pub const RPL_TOPIC: u16 = 332;
    pub const RPL_TOPICWHOTIME: u16 = 333;
    pub const RPL_NAMREPLY: u16 = 353;
    pub const ERR_ERRONEUSNICKNAME: u16 = 432;
    pub const ERR_NICKNAMEINUSE: u16 = 433;
}

/// Returns true if `target` names a channel rather than a user.
pub fn is_channel_name(target: &str) -> bool {
    target.starts_with(['#', '&', '+', '!'])
}
