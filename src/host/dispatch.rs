//! Module registry and event fan-out.
//!
//! Every event is handed to every module exactly once, in registration
//! order (modules must not rely on that order). Command routing for
//! public and private triggers, and the built-in help command, are layered
//! on top of the generic handlers.

use std::sync::Arc;

use tracing::{debug, info};

use super::event::{Event, User};
use super::handle::BotHandle;
use super::help;
use super::module::Module;

/// Help command settings.
#[derive(Debug, Clone, Default)]
pub struct HelpSettings {
    /// Line shown before the listing.
    pub intro: Option<String>,
    /// Command word: `!word` in a channel, `word` in private. `None` disables.
    pub trigger: Option<String>,
}

/// Holds the installed modules and routes events to them.
#[derive(Default)]
pub struct Dispatcher {
    modules: Vec<Arc<dyn Module>>,
    help: HelpSettings,
}

impl Dispatcher {
    pub fn new(help: HelpSettings) -> Self {
        Self {
            modules: Vec::new(),
            help,
        }
    }

    pub fn add_module(&mut self, module: Arc<dyn Module>) {
        info!(module = %module.name(), "Module registered");
        self.modules.push(module);
    }

    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    pub fn set_help_intro(&mut self, intro: &str) {
        self.help.intro = Some(intro.to_owned());
    }

    pub fn dispatch_connect(&self, bot: &BotHandle) {
        for module in &self.modules {
            module.on_connect(bot);
        }
    }

    pub fn dispatch_disconnect(&self, bot: &BotHandle) {
        for module in &self.modules {
            module.on_disconnect(bot);
        }
    }

    /// Routes one inbound event.
    pub fn dispatch(&self, bot: &BotHandle, event: &Event) {
        debug!(kind = event.kind(), "Dispatching event");
        match event {
            Event::Topic {
                channel,
                topic,
                set_by,
                date,
                changed,
            } => {
                for module in &self.modules {
                    module.on_topic(bot, channel, topic, set_by, *date, *changed);
                }
            }
            Event::Message {
                channel,
                sender,
                text,
            } => self.dispatch_message(bot, channel, sender, text),
            Event::PrivateMessage { sender, text } => {
                self.dispatch_private_message(bot, sender, text, || bot.is_user_op(&sender.nick));
            }
            Event::Action {
                sender,
                target,
                action,
            } => {
                for module in &self.modules {
                    module.on_action(bot, sender, target, action);
                }
            }
            Event::ServerResponse { code, response } => {
                for module in &self.modules {
                    module.on_server_response(bot, *code, response);
                }
            }
            Event::Join { channel, sender } => {
                for module in &self.modules {
                    module.on_join(bot, channel, sender);
                }
            }
            Event::Part { channel, sender } => {
                for module in &self.modules {
                    module.on_part(bot, channel, sender);
                }
            }
            Event::NickChange { sender, new_nick } => {
                for module in &self.modules {
                    module.on_nick_change(bot, sender, new_nick);
                }
            }
            Event::Quit { sender, reason } => {
                for module in &self.modules {
                    module.on_quit(bot, sender, reason);
                }
            }
            Event::Mode {
                channel,
                source,
                mode,
            } => {
                for module in &self.modules {
                    module.on_mode(bot, channel, source, mode);
                }
            }
            Event::UserMode {
                target,
                source,
                mode,
            } => {
                for module in &self.modules {
                    module.on_user_mode(bot, target, source, mode);
                }
            }
            Event::Kick {
                channel,
                kicker,
                recipient,
                reason,
            } => {
                for module in &self.modules {
                    module.on_kick(bot, channel, kicker, recipient, reason);
                }
            }
        }
    }

    fn dispatch_message(&self, bot: &BotHandle, channel: &str, sender: &User, text: &str) {
        for module in &self.modules {
            module.on_message(bot, channel, sender, text);

            if let Some(public) = module.public_trigger()
                && text.strip_prefix('!') == Some(public.trigger_word())
            {
                public.on_trigger(bot, channel, sender, text);
            }
        }

        if let Some(trigger) = self.help.trigger.as_deref()
            && text.strip_prefix('!') == Some(trigger)
        {
            for line in self.build_help(bot, &sender.nick, false) {
                bot.send_notice(&sender.nick, &line);
            }
        }
    }

    /// `sender_is_op` is evaluated at most once for the whole message, and
    /// only if a matching trigger requires operator status.
    fn dispatch_private_message(
        &self,
        bot: &BotHandle,
        sender: &User,
        text: &str,
        mut sender_is_op: impl FnMut() -> bool,
    ) {
        let mut is_op: Option<bool> = None;

        for module in &self.modules {
            module.on_private_message(bot, sender, text);

            let Some(private) = module.private_trigger() else {
                continue;
            };
            if text != private.trigger_phrase() {
                continue;
            }
            if private.op_required() && !*is_op.get_or_insert_with(&mut sender_is_op) {
                info!(
                    sender = %sender.nick,
                    module = %module.name(),
                    "Sender is not an operator, trigger ignored"
                );
                continue;
            }
            private.on_trigger(bot, sender, text);
        }

        if self.help.trigger.as_deref() == Some(text) {
            for line in self.build_help(bot, &sender.nick, true) {
                bot.send_message(&sender.nick, &line);
            }
        }
    }

    /// Help listing for `nick`, public or private flavor.
    pub fn build_help(&self, bot: &BotHandle, nick: &str, in_private: bool) -> Vec<String> {
        help::build_help(
            &self.modules,
            self.help.intro.as_deref(),
            in_private,
            || bot.is_user_op(nick),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::module::{PrivateTrigger, PublicTrigger};
    use crate::host::handle::OutboxReceiver;
    use crate::proto::Message;
    use crate::state;
    use parking_lot::Mutex;
    use tokio::sync::mpsc;

    /// Records every call it receives.
    #[derive(Default)]
    struct Probe {
        name: String,
        word: Option<String>,
        phrase: Option<String>,
        op_required: bool,
        calls: Mutex<Vec<String>>,
    }

    impl Probe {
        fn named(name: &str) -> Self {
            Self {
                name: name.to_owned(),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().push(call);
        }
    }

    impl Module for Probe {
        fn name(&self) -> &str {
            &self.name
        }

        fn on_message(&self, _bot: &BotHandle, channel: &str, sender: &User, message: &str) {
            self.record(format!("message {channel} {} {message}", sender.nick));
        }

        fn on_private_message(&self, _bot: &BotHandle, sender: &User, message: &str) {
            self.record(format!("private {} {message}", sender.nick));
        }

        fn on_join(&self, _bot: &BotHandle, channel: &str, sender: &User) {
            self.record(format!("join {channel} {}", sender.nick));
        }

        fn on_kick(
            &self,
            _bot: &BotHandle,
            channel: &str,
            kicker: &User,
            recipient: &str,
            reason: &str,
        ) {
            self.record(format!("kick {channel} {} {recipient} {reason}", kicker.nick));
        }

        fn public_trigger(&self) -> Option<&dyn PublicTrigger> {
            self.word.as_ref().map(|_| self as &dyn PublicTrigger)
        }

        fn private_trigger(&self) -> Option<&dyn PrivateTrigger> {
            self.phrase.as_ref().map(|_| self as &dyn PrivateTrigger)
        }
    }

    impl PublicTrigger for Probe {
        fn trigger_word(&self) -> &str {
            self.word.as_deref().unwrap_or_default()
        }

        fn on_trigger(&self, _bot: &BotHandle, channel: &str, _sender: &User, _message: &str) {
            self.record(format!("public-trigger {channel}"));
        }
    }

    impl PrivateTrigger for Probe {
        fn trigger_phrase(&self) -> &str {
            self.phrase.as_deref().unwrap_or_default()
        }

        fn op_required(&self) -> bool {
            self.op_required
        }

        fn on_trigger(&self, _bot: &BotHandle, sender: &User, _message: &str) {
            self.record(format!("private-trigger {}", sender.nick));
        }
    }

    fn bot() -> (BotHandle, OutboxReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (BotHandle::new(state::shared("bot"), tx), rx)
    }

    fn alice() -> User {
        User::new("alice", "a", "host")
    }

    fn drain(rx: &mut OutboxReceiver) -> Vec<Message> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[test]
    fn every_module_sees_every_event_once() {
        let (bot, _rx) = bot();
        let first = Arc::new(Probe::named("first"));
        let second = Arc::new(Probe::named("second"));
        let mut dispatcher = Dispatcher::default();
        dispatcher.add_module(first.clone());
        dispatcher.add_module(second.clone());

        dispatcher.dispatch(
            &bot,
            &Event::Join {
                channel: "#rust".into(),
                sender: alice(),
            },
        );
        dispatcher.dispatch(
            &bot,
            &Event::Kick {
                channel: "#rust".into(),
                kicker: alice(),
                recipient: "bob".into(),
                reason: "flood".into(),
            },
        );

        for probe in [&first, &second] {
            assert_eq!(
                probe.calls(),
                vec!["join #rust alice", "kick #rust alice bob flood"]
            );
        }
    }

    #[test]
    fn public_trigger_requires_exact_command() {
        let (bot, _rx) = bot();
        let probe = Arc::new(Probe {
            word: Some("uptime".into()),
            ..Probe::named("uptime")
        });
        let mut dispatcher = Dispatcher::default();
        dispatcher.add_module(probe.clone());

        for text in ["!uptime", "!uptime now", "!UPTIME", "uptime"] {
            dispatcher.dispatch(
                &bot,
                &Event::Message {
                    channel: "#rust".into(),
                    sender: alice(),
                    text: text.into(),
                },
            );
        }

        let triggers: Vec<_> = probe
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("public-trigger"))
            .collect();
        assert_eq!(triggers, vec!["public-trigger #rust"]);
        assert_eq!(probe.calls()[0], "message #rust alice !uptime");
        assert_eq!(probe.calls()[1], "public-trigger #rust");
    }

    #[test]
    fn op_check_runs_once_per_private_message() {
        let (bot, _rx) = bot();
        let a = Arc::new(Probe {
            phrase: Some("die".into()),
            op_required: true,
            ..Probe::named("a")
        });
        let b = Arc::new(Probe {
            phrase: Some("die".into()),
            op_required: true,
            ..Probe::named("b")
        });
        let mut dispatcher = Dispatcher::default();
        dispatcher.add_module(a.clone());
        dispatcher.add_module(b.clone());

        let mut checks = 0;
        dispatcher.dispatch_private_message(&bot, &alice(), "die", || {
            checks += 1;
            true
        });
        assert_eq!(checks, 1);
        assert!(a.calls().contains(&"private-trigger alice".to_string()));
        assert!(b.calls().contains(&"private-trigger alice".to_string()));
    }

    #[test]
    fn op_check_skipped_when_not_needed() {
        let (bot, _rx) = bot();
        let open = Arc::new(Probe {
            phrase: Some("hello".into()),
            ..Probe::named("open")
        });
        let mut dispatcher = Dispatcher::default();
        dispatcher.add_module(open.clone());

        let mut checks = 0;
        dispatcher.dispatch_private_message(&bot, &alice(), "hello", || {
            checks += 1;
            false
        });
        dispatcher.dispatch_private_message(&bot, &alice(), "other", || {
            checks += 1;
            false
        });
        assert_eq!(checks, 0);
        assert_eq!(
            open.calls(),
            vec!["private alice hello", "private-trigger alice", "private alice other"]
        );
    }

    #[test]
    fn non_operator_is_refused_silently() {
        let (bot, mut rx) = bot();
        let guarded = Arc::new(Probe {
            phrase: Some("die".into()),
            op_required: true,
            ..Probe::named("guarded")
        });
        let mut dispatcher = Dispatcher::default();
        dispatcher.add_module(guarded.clone());

        dispatcher.dispatch(
            &bot,
            &Event::PrivateMessage {
                sender: alice(),
                text: "die".into(),
            },
        );
        assert_eq!(guarded.calls(), vec!["private alice die"]);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn help_command_answers_by_notice_and_privately() {
        let (bot, mut rx) = bot();
        let probe = Arc::new(Probe {
            word: Some("uptime".into()),
            phrase: Some("uptime".into()),
            ..Probe::named("uptime")
        });
        let mut dispatcher = Dispatcher::new(HelpSettings {
            intro: Some("Commands:".into()),
            trigger: Some("help".into()),
        });
        dispatcher.add_module(probe);

        dispatcher.dispatch(
            &bot,
            &Event::Message {
                channel: "#rust".into(),
                sender: alice(),
                text: "!help".into(),
            },
        );
        let sent: Vec<String> = drain(&mut rx).iter().map(ToString::to_string).collect();
        assert_eq!(sent, vec!["NOTICE alice Commands:", "NOTICE alice !uptime"]);

        dispatcher.dispatch(
            &bot,
            &Event::PrivateMessage {
                sender: alice(),
                text: "help".into(),
            },
        );
        let sent: Vec<String> = drain(&mut rx).iter().map(ToString::to_string).collect();
        assert_eq!(sent, vec!["PRIVMSG alice Commands:", "PRIVMSG alice uptime"]);
    }
}
