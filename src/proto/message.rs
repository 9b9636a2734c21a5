use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

use super::prefix::Prefix;

/// Errors produced while parsing a raw line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty message")]
    EmptyMessage,
    #[error("missing command in {0:?}")]
    MissingCommand(String),
}

/// A single IRC line.
///
/// Message tags are accepted on input but not kept; the bot has no use for
/// them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub prefix: Option<Prefix>,
    pub command: String,
    pub params: Vec<String>,
}

impl Message {
    pub fn new(command: &str, params: Vec<String>) -> Self {
        Self {
            prefix: None,
            command: command.to_owned(),
            params,
        }
    }

    pub fn nick(nick: &str) -> Self {
        Self::new("NICK", vec![nick.to_owned()])
    }

    pub fn user(username: &str, realname: &str) -> Self {
        Self::new(
            "USER",
            vec![
                username.to_owned(),
                "0".to_owned(),
                "*".to_owned(),
                realname.to_owned(),
            ],
        )
    }

    pub fn privmsg(target: &str, text: &str) -> Self {
        Self::new("PRIVMSG", vec![target.to_owned(), text.to_owned()])
    }

    pub fn notice(target: &str, text: &str) -> Self {
        Self::new("NOTICE", vec![target.to_owned(), text.to_owned()])
    }

    pub fn pong(token: &str) -> Self {
        Self::new("PONG", vec![token.to_owned()])
    }

    /// Returns the numeric code if this is a three-digit server reply.
    pub fn numeric(&self) -> Option<u16> {
        if self.command.len() == 3 && self.command.bytes().all(|b| b.is_ascii_digit()) {
            self.command.parse().ok()
        } else {
            None
        }
    }

    /// Nickname of the sender, if the prefix names a user.
    pub fn source_nick(&self) -> Option<&str> {
        self.prefix.as_ref().and_then(Prefix::nick)
    }

    pub fn param(&self, idx: usize) -> Option<&str> {
        self.params.get(idx).map(String::as_str)
    }

    /// Attaches an origin prefix; used when building inbound lines in tests.
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }
}

impl FromStr for Message {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s.trim_end_matches(['\r', '\n']);
        if rest.trim().is_empty() {
            return Err(ParseError::EmptyMessage);
        }

        if rest.starts_with('@') {
            rest = match rest.split_once(' ') {
                Some((_, after)) => after.trim_start_matches(' '),
                None => return Err(ParseError::MissingCommand(s.to_owned())),
            };
        }

        let prefix = if let Some(stripped) = rest.strip_prefix(':') {
            let (raw, after) = match stripped.split_once(' ') {
                Some(parts) => parts,
                None => return Err(ParseError::MissingCommand(s.to_owned())),
            };
            rest = after.trim_start_matches(' ');
            Some(Prefix::parse(raw))
        } else {
            None
        };

        let (command, mut rest) = match rest.split_once(' ') {
            Some((command, after)) => (command, Some(after)),
            None => (rest, None),
        };
        if command.is_empty() {
            return Err(ParseError::MissingCommand(s.to_owned()));
        }

        let mut params = Vec::new();
        while let Some(remaining) = rest {
            let remaining = remaining.trim_start_matches(' ');
            if remaining.is_empty() {
                break;
            }
            if let Some(trailing) = remaining.strip_prefix(':') {
                params.push(trailing.to_owned());
                break;
            }
            match remaining.split_once(' ') {
                Some((param, after)) => {
                    params.push(param.to_owned());
                    rest = Some(after);
                }
                None => {
                    params.push(remaining.to_owned());
                    rest = None;
                }
            }
        }

        Ok(Message {
            prefix,
            command: command.to_ascii_uppercase(),
            params,
        })
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        f.write_str(&self.command)?;

        let last = self.params.len().saturating_sub(1);
        for (i, param) in self.params.iter().enumerate() {
            let needs_colon =
                i == last && (param.is_empty() || param.contains(' ') || param.starts_with(':'));
            if needs_colon {
                write!(f, " :{}", param)?;
            } else {
                write!(f, " {}", param)?;
            }
        }
        Ok(())
    }
}
