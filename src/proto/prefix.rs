//! Message origin (`:nick!user@host` or `:server.name`).

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// Server name (e.g., "irc.example.net").
    ServerName(String),
    /// User prefix: (nickname, username, hostname). Missing parts are empty.
    Nickname(String, String, String),
}

impl Prefix {
    /// Lenient prefix parser: anything with a `!` or `@` is a user, a bare
    /// token containing a dot is a server, everything else is a nickname.
    pub fn parse(s: &str) -> Self {
        let (name, rest) = match s.find(['!', '@']) {
            Some(idx) => (&s[..idx], &s[idx..]),
            None => {
                if s.contains('.') {
                    return Prefix::ServerName(s.to_owned());
                }
                return Prefix::Nickname(s.to_owned(), String::new(), String::new());
            }
        };

        let (user, host) = match rest.strip_prefix('!') {
            Some(after_bang) => match after_bang.split_once('@') {
                Some((user, host)) => (user, host),
                None => (after_bang, ""),
            },
            None => ("", rest.trim_start_matches('@')),
        };

        Prefix::Nickname(name.to_owned(), user.to_owned(), host.to_owned())
    }

    /// Nickname of a user prefix, `None` for servers.
    pub fn nick(&self) -> Option<&str> {
        match self {
            Prefix::Nickname(nick, _, _) => Some(nick),
            Prefix::ServerName(_) => None,
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => f.write_str(name),
            Prefix::Nickname(nick, user, host) => {
                f.write_str(nick)?;
                if !user.is_empty() {
                    write!(f, "!{}", user)?;
                }
                if !host.is_empty() {
                    write!(f, "@{}", host)?;
                }
                Ok(())
            }
        }
    }
}
