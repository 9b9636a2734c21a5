//! Periodic announcements, cycling through a list of lines.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::AnnouncerConfig;
use crate::host::{BotHandle, Module, Runnable, Stoppable};

pub struct Announcer {
    channels: Vec<String>,
    lines: Vec<String>,
    interval: Duration,
    next_line: AtomicUsize,
    stopped: CancellationToken,
}

impl Announcer {
    pub fn new(config: &AnnouncerConfig) -> Self {
        Self {
            channels: config.channels.clone(),
            lines: config.lines.clone(),
            interval: Duration::from_secs(config.interval_secs),
            next_line: AtomicUsize::new(0),
            stopped: CancellationToken::new(),
        }
    }

    fn announce(&self, bot: &BotHandle) {
        if self.lines.is_empty() {
            return;
        }
        let idx = self.next_line.fetch_add(1, Ordering::Relaxed) % self.lines.len();
        let line = &self.lines[idx];

        let targets = if self.channels.is_empty() {
            bot.channels()
        } else {
            self.channels.clone()
        };
        debug!(targets = targets.len(), "Announcing");
        for channel in targets {
            bot.send_message(&channel, line);
        }
    }
}

impl Module for Announcer {
    fn name(&self) -> &str {
        "announcer"
    }

    fn runnable(&self) -> Option<&dyn Runnable> {
        Some(self)
    }

    fn stoppable(&self) -> Option<&dyn Stoppable> {
        Some(self)
    }
}

#[async_trait]
impl Runnable for Announcer {
    async fn run(&self, bot: BotHandle, stop: CancellationToken) {
        let mut interval = tokio::time::interval_at(
            tokio::time::Instant::now() + self.interval,
            self.interval,
        );
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = stop.cancelled() => break,
                () = self.stopped.cancelled() => break,
                _ = interval.tick() => self.announce(&bot),
            }
        }
        info!("Announcer stopped");
    }
}

impl Stoppable for Announcer {
    fn stop(&self) {
        self.stopped.cancel();
    }
}
