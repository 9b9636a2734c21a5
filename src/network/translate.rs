//! Translation of inbound lines into roster updates and typed events.

use tracing::{debug, warn};

use crate::host::{Event, User};
use crate::proto::{Message, ctcp, is_channel_name, numeric};
use crate::state::{ClientState, MemberModes};

/// Channel modes taking a parameter when set (`+`).
const PARAM_MODES_ON_SET: &str = "ovhaqbeIkl";
/// Channel modes taking a parameter when unset (`-`).
const PARAM_MODES_ON_UNSET: &str = "ovhaqbeIk";

/// Applies `message` to `state` and returns the events it produces.
///
/// The roster is updated before the event is returned, so modules always
/// observe the state that follows the event.
pub fn translate(message: &Message, state: &mut ClientState) -> Vec<Event> {
    if let Some(code) = message.numeric() {
        return translate_numeric(code, message, state);
    }

    if message.command == "ERROR" {
        warn!(reason = %message.param(0).unwrap_or_default(), "Server sent ERROR");
        return Vec::new();
    }

    let Some(prefix) = message.prefix.as_ref() else {
        debug!(command = %message.command, "Ignoring message without origin");
        return Vec::new();
    };
    let sender = User::from_prefix(prefix);

    match message.command.as_str() {
        "PRIVMSG" => {
            let (Some(target), Some(text)) = (message.param(0), message.param(1)) else {
                return Vec::new();
            };
            if let Some(action) = ctcp::parse_action(text) {
                vec![Event::Action {
                    sender,
                    target: target.to_owned(),
                    action: action.to_owned(),
                }]
            } else if is_channel_name(target) {
                vec![Event::Message {
                    channel: target.to_owned(),
                    sender,
                    text: text.to_owned(),
                }]
            } else {
                vec![Event::PrivateMessage {
                    sender,
                    text: text.to_owned(),
                }]
            }
        }
        "JOIN" => {
            let Some(channel) = message.param(0) else {
                return Vec::new();
            };
            if state.is_me(&sender.nick) {
                state.join_channel(channel);
            }
            state.add_user(channel, &sender.nick);
            vec![Event::Join {
                channel: channel.to_owned(),
                sender,
            }]
        }
        "PART" => {
            let Some(channel) = message.param(0) else {
                return Vec::new();
            };
            if state.is_me(&sender.nick) {
                state.leave_channel(channel);
            } else if let Some(chan) = state.channel_mut(channel) {
                chan.remove(&sender.nick);
            }
            vec![Event::Part {
                channel: channel.to_owned(),
                sender,
            }]
        }
        "KICK" => {
            let (Some(channel), Some(recipient)) = (message.param(0), message.param(1)) else {
                return Vec::new();
            };
            if state.is_me(recipient) {
                state.leave_channel(channel);
            } else if let Some(chan) = state.channel_mut(channel) {
                chan.remove(recipient);
            }
            vec![Event::Kick {
                channel: channel.to_owned(),
                kicker: sender,
                recipient: recipient.to_owned(),
                reason: message.param(2).unwrap_or_default().to_owned(),
            }]
        }
        "QUIT" => {
            state.remove_user_everywhere(&sender.nick);
            vec![Event::Quit {
                sender,
                reason: message.param(0).unwrap_or_default().to_owned(),
            }]
        }
        "NICK" => {
            let Some(new_nick) = message.param(0) else {
                return Vec::new();
            };
            state.rename_user(&sender.nick, new_nick);
            vec![Event::NickChange {
                sender,
                new_nick: new_nick.to_owned(),
            }]
        }
        "TOPIC" => {
            let (Some(channel), Some(topic)) = (message.param(0), message.param(1)) else {
                return Vec::new();
            };
            if let Some(chan) = state.channel_mut(channel) {
                chan.topic = Some(topic.to_owned());
            }
            vec![Event::Topic {
                channel: channel.to_owned(),
                topic: topic.to_owned(),
                set_by: sender.nick,
                date: chrono::Utc::now().timestamp_millis(),
                changed: true,
            }]
        }
        "MODE" => {
            let Some(target) = message.param(0) else {
                return Vec::new();
            };
            let mode = message.params[1..].join(" ");
            if is_channel_name(target) {
                apply_channel_modes(state, target, &message.params[1..]);
                vec![Event::Mode {
                    channel: target.to_owned(),
                    source: sender,
                    mode,
                }]
            } else {
                vec![Event::UserMode {
                    target: target.to_owned(),
                    source: sender,
                    mode,
                }]
            }
        }
        _ => Vec::new(),
    }
}

fn translate_numeric(code: u16, message: &Message, state: &mut ClientState) -> Vec<Event> {
    let mut events = Vec::new();

    match code {
        numeric::RPL_NAMREPLY => {
            // <me> <symbol> <channel> :<names>
            if let (Some(channel), Some(names)) = (message.param(2), message.param(3))
                && let Some(chan) = state.channel_mut(channel)
            {
                for entry in names.split_whitespace() {
                    let (modes, nick) = MemberModes::from_names_entry(entry);
                    chan.upsert(nick, modes);
                }
            }
        }
        numeric::RPL_TOPIC => {
            // <me> <channel> :<topic>
            if let (Some(channel), Some(topic)) = (message.param(1), message.param(2))
                && let Some(chan) = state.channel_mut(channel)
            {
                chan.topic = Some(topic.to_owned());
            }
        }
        numeric::RPL_TOPICWHOTIME => {
            // <me> <channel> <setter> <seconds>
            if let (Some(channel), Some(setter)) = (message.param(1), message.param(2)) {
                let topic = state
                    .channel(channel)
                    .and_then(|c| c.topic.clone())
                    .unwrap_or_default();
                let seconds: i64 = message.param(3).and_then(|s| s.parse().ok()).unwrap_or(0);
                let set_by = setter.split('!').next().unwrap_or(setter);
                events.push(Event::Topic {
                    channel: channel.to_owned(),
                    topic,
                    set_by: set_by.to_owned(),
                    date: seconds * 1000,
                    changed: false,
                });
            }
        }
        _ => {}
    }

    events.insert(
        0,
        Event::ServerResponse {
            code,
            response: message.params.join(" "),
        },
    );
    events
}

/// Applies the member modes (`o`, `v`) of a channel MODE line, consuming
/// parameters for the other parameterised modes so arguments stay aligned.
fn apply_channel_modes(state: &mut ClientState, channel: &str, args: &[String]) {
    let Some((modes, params)) = args.split_first() else {
        return;
    };
    let Some(chan) = state.channel_mut(channel) else {
        return;
    };

    let mut params = params.iter();
    let mut adding = true;
    for mode in modes.chars() {
        match mode {
            '+' => adding = true,
            '-' => adding = false,
            _ => {
                let takes_param = if adding {
                    PARAM_MODES_ON_SET.contains(mode)
                } else {
                    PARAM_MODES_ON_UNSET.contains(mode)
                };
                if !takes_param {
                    continue;
                }
                let Some(param) = params.next() else {
                    break;
                };
                if matches!(mode, 'o' | 'v') {
                    chan.set_mode(param, mode, adding);
                }
            }
        }
    }
}
