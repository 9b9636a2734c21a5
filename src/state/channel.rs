//! Channel roster types.

/// Member modes the bot tracks for permission checks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemberModes {
    pub op: bool,    // +o (@)
    pub voice: bool, // +v (+)
}

impl MemberModes {
    /// Splits a NAMES entry such as `@+alice` into its modes and nickname.
    ///
    /// Prefixes other than `@` and `+` (e.g. `~`, `&`, `%`) are stripped but
    /// grant nothing.
    pub fn from_names_entry(entry: &str) -> (Self, &str) {
        let nick = entry.trim_start_matches(['~', '&', '@', '%', '+']);
        let prefixes = &entry[..entry.len() - nick.len()];
        let modes = Self {
            op: prefixes.contains('@'),
            voice: prefixes.contains('+'),
        };
        (modes, nick)
    }
}

/// A user seen on a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelUser {
    pub nick: String,
    pub modes: MemberModes,
}

impl ChannelUser {
    pub fn is_op(&self) -> bool {
        self.modes.op
    }
}

/// A channel the bot has joined.
#[derive(Debug, Clone)]
pub struct Channel {
    pub name: String,
    pub topic: Option<String>,
    users: Vec<ChannelUser>,
}

impl Channel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            topic: None,
            users: Vec::new(),
        }
    }

    pub fn users(&self) -> &[ChannelUser] {
        &self.users
    }

    pub fn user(&self, nick: &str) -> Option<&ChannelUser> {
        self.users.iter().find(|u| u.nick == nick)
    }

    /// Adds a user or refreshes the modes of an existing one.
    pub fn upsert(&mut self, nick: &str, modes: MemberModes) {
        match self.users.iter_mut().find(|u| u.nick == nick) {
            Some(user) => user.modes = modes,
            None => self.users.push(ChannelUser {
                nick: nick.to_owned(),
                modes,
            }),
        }
    }

    pub fn remove(&mut self, nick: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.nick != nick);
        self.users.len() != before
    }

    pub fn rename(&mut self, old: &str, new: &str) {
        if let Some(user) = self.users.iter_mut().find(|u| u.nick == old) {
            user.nick = new.to_owned();
        }
    }

    /// Applies a single member mode change; returns false for unknown users.
    pub fn set_mode(&mut self, nick: &str, mode: char, enabled: bool) -> bool {
        let Some(user) = self.users.iter_mut().find(|u| u.nick == nick) else {
            return false;
        };
        match mode {
            'o' => user.modes.op = enabled,
            'v' => user.modes.voice = enabled,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_entry_prefixes() {
        let (modes, nick) = MemberModes::from_names_entry("@+alice");
        assert_eq!(nick, "alice");
        assert!(modes.op && modes.voice);

        let (modes, nick) = MemberModes::from_names_entry("bob");
        assert_eq!(nick, "bob");
        assert_eq!(modes, MemberModes::default());

        let (modes, nick) = MemberModes::from_names_entry("~carol");
        assert_eq!(nick, "carol");
        assert!(!modes.op);
    }

    #[test]
    fn upsert_rename_and_remove() {
        let mut chan = Channel::new("#rust");
        chan.upsert("alice", MemberModes::default());
        chan.upsert("alice", MemberModes { op: true, voice: false });
        assert_eq!(chan.users().len(), 1);
        assert!(chan.user("alice").is_some_and(ChannelUser::is_op));

        chan.rename("alice", "alicia");
        assert!(chan.user("alice").is_none());
        assert!(chan.remove("alicia"));
        assert!(!chan.remove("alicia"));
    }

    #[test]
    fn set_mode_only_touches_known_users() {
        let mut chan = Channel::new("#rust");
        chan.upsert("dave", MemberModes::default());
        assert!(chan.set_mode("dave", 'o', true));
        assert!(chan.user("dave").is_some_and(ChannelUser::is_op));
        assert!(!chan.set_mode("ghost", 'o', true));
        assert!(!chan.set_mode("dave", 'h', true));
    }
}
