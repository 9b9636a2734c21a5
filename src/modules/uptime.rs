//! `!uptime`: how long the bot has been running.

use chrono::{DateTime, TimeDelta, Utc};

use crate::config::UptimeConfig;
use crate::host::{BotHandle, Module, PrivateTrigger, PublicTrigger, User};

pub struct Uptime {
    trigger: String,
    started: DateTime<Utc>,
}

impl Uptime {
    pub fn new(config: &UptimeConfig) -> Self {
        Self::started_at(config, Utc::now())
    }

    pub fn started_at(config: &UptimeConfig, started: DateTime<Utc>) -> Self {
        Self {
            trigger: config.trigger.clone(),
            started,
        }
    }

    fn report(&self) -> String {
        format!("Up for {}", format_uptime(Utc::now() - self.started))
    }
}

/// `3d 4h 5m 6s`, leading zero units omitted.
pub fn format_uptime(elapsed: TimeDelta) -> String {
    let total = elapsed.num_seconds().max(0);
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        total % 86_400 / 3_600,
        total % 3_600 / 60,
        total % 60,
    );
    match (days, hours, minutes) {
        (0, 0, 0) => format!("{seconds}s"),
        (0, 0, _) => format!("{minutes}m {seconds}s"),
        (0, _, _) => format!("{hours}h {minutes}m {seconds}s"),
        _ => format!("{days}d {hours}h {minutes}m {seconds}s"),
    }
}

impl Module for Uptime {
    fn name(&self) -> &str {
        "uptime"
    }

    fn public_trigger(&self) -> Option<&dyn PublicTrigger> {
        Some(self)
    }

    fn private_trigger(&self) -> Option<&dyn PrivateTrigger> {
        Some(self)
    }
}

impl PublicTrigger for Uptime {
    fn trigger_word(&self) -> &str {
        &self.trigger
    }

    fn help(&self) -> Option<&str> {
        Some("Tells how long I have been running")
    }

    fn on_trigger(&self, bot: &BotHandle, channel: &str, _sender: &User, _message: &str) {
        bot.send_message(channel, &self.report());
    }
}

impl PrivateTrigger for Uptime {
    fn trigger_phrase(&self) -> &str {
        &self.trigger
    }

    fn on_trigger(&self, bot: &BotHandle, sender: &User, _message: &str) {
        bot.send_message(&sender.nick, &self.report());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state;
    use tokio::sync::mpsc;

    #[test]
    fn formats_durations() {
        assert_eq!(format_uptime(TimeDelta::seconds(42)), "42s");
        assert_eq!(format_uptime(TimeDelta::seconds(61)), "1m 1s");
        assert_eq!(format_uptime(TimeDelta::seconds(3_600)), "1h 0m 0s");
        assert_eq!(
            format_uptime(TimeDelta::seconds(2 * 86_400 + 3 * 3_600 + 4 * 60 + 5)),
            "2d 3h 4m 5s"
        );
        assert_eq!(format_uptime(TimeDelta::seconds(-5)), "0s");
    }

    #[test]
    fn answers_where_it_was_asked() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let bot = BotHandle::new(state::shared("bot"), tx);
        let config = UptimeConfig {
            trigger: "uptime".into(),
        };
        let module = Uptime::started_at(&config, Utc::now() - TimeDelta::days(3));
        let alice = User::new("alice", "a", "h");

        PublicTrigger::on_trigger(&module, &bot, "#chan", &alice, "!uptime");
        PrivateTrigger::on_trigger(&module, &bot, &alice, "uptime");

        let public = rx.try_recv().unwrap().to_string();
        let private = rx.try_recv().unwrap().to_string();
        assert!(public.starts_with("PRIVMSG #chan :Up for 3d 0h 0m"), "{public}");
        assert!(private.starts_with("PRIVMSG alice :Up for 3d"), "{private}");
    }
}
