//! Client-side view of the network: our nick and the channels we sit in.

use std::collections::HashMap;

use super::channel::{Channel, MemberModes};

/// State maintained by the session from server traffic and read by modules.
#[derive(Debug, Clone)]
pub struct ClientState {
    nick: String,
    /// Keyed by lower-cased channel name.
    channels: HashMap<String, Channel>,
}

fn channel_key(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl ClientState {
    pub fn new(nick: &str) -> Self {
        Self {
            nick: nick.to_owned(),
            channels: HashMap::new(),
        }
    }

    /// Our current nickname.
    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub fn set_nick(&mut self, nick: &str) {
        self.nick = nick.to_owned();
    }

    pub fn is_me(&self, nick: &str) -> bool {
        self.nick == nick
    }

    /// Names of the joined channels, as the server spelled them.
    pub fn channel_names(&self) -> Vec<String> {
        self.channels.values().map(|c| c.name.clone()).collect()
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(&channel_key(name))
    }

    pub fn channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(&channel_key(name))
    }

    pub fn join_channel(&mut self, name: &str) -> &mut Channel {
        self.channels
            .entry(channel_key(name))
            .or_insert_with(|| Channel::new(name))
    }

    pub fn leave_channel(&mut self, name: &str) -> Option<Channel> {
        self.channels.remove(&channel_key(name))
    }

    /// Forgets every channel; called when the link drops.
    pub fn clear_channels(&mut self) {
        self.channels.clear();
    }

    /// Records `nick` on `channel` with default modes (no-op when unknown channel).
    pub fn add_user(&mut self, channel: &str, nick: &str) {
        if let Some(chan) = self.channel_mut(channel) {
            chan.upsert(nick, MemberModes::default());
        }
    }

    /// Removes `nick` from every channel, returning the channels it was on.
    pub fn remove_user_everywhere(&mut self, nick: &str) -> Vec<String> {
        self.channels
            .values_mut()
            .filter_map(|c| c.remove(nick).then(|| c.name.clone()))
            .collect()
    }

    /// Applies a nick change to the roster, and to our own nick if it was ours.
    pub fn rename_user(&mut self, old: &str, new: &str) {
        if self.nick == old {
            self.nick = new.to_owned();
        }
        for chan in self.channels.values_mut() {
            chan.rename(old, new);
        }
    }

    /// Operator on any joined channel.
    ///
    /// Each channel is searched for the first user with exactly this nick; a
    /// match without operator status ends the search in that channel only.
    /// Unknown nicks are not operators.
    pub fn is_user_op(&self, nick: &str) -> bool {
        self.channels
            .values()
            .any(|chan| chan.user(nick).is_some_and(|u| u.is_op()))
    }

    /// Operator on one specific channel.
    pub fn is_op_in(&self, channel: &str, nick: &str) -> bool {
        self.channel(channel)
            .and_then(|c| c.user(nick))
            .is_some_and(|u| u.is_op())
    }
}
