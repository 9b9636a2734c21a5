//! Connection lifecycle orchestration.
//!
//! ```text
//! Disconnected -> Connecting -> Connected -> Disconnected -> Connecting ...
//!                   ^    |                \
//!                   +----+ (failed)        +-> ShuttingDown -> Terminated
//! ```
//!
//! `Connecting` loops over the endpoint list until one accepts us. Every
//! successful connect dispatches `on_connect` and then starts the runnable
//! modules. An unexpected disconnect reconnects; a requested one (see
//! [`BotHandle::quit`]) runs the bounded shutdown protocol.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

use super::dispatch::{Dispatcher, HelpSettings};
use super::handle::{BotHandle, OutboxReceiver};
use super::module::Module;
use crate::config::{Config, Endpoint};
use crate::network::{Connector, Session};
use crate::state;

/// Interval between two checks for module tasks still running at shutdown.
pub const SHUTDOWN_CHECK_INTERVAL: Duration = Duration::from_millis(1500);

/// Number of checks before giving up on module tasks.
pub const SHUTDOWN_CHECKS: u32 = 3;

/// Link state of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
    ShuttingDown,
    Terminated,
}

/// Host settings independent of the transport.
#[derive(Debug, Clone)]
pub struct HostSettings {
    /// Nick we start with; the server may hand us another one.
    pub nick: String,
    /// Round-robin connection candidates, never empty.
    pub endpoints: Vec<Endpoint>,
    /// Pause between two failed attempts.
    pub retry_delay: Duration,
    pub help: HelpSettings,
}

impl HostSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            nick: config.bot.nick.clone(),
            endpoints: config.endpoint_list(),
            retry_delay: config.bot.retry_delay(),
            help: HelpSettings {
                intro: config.bot.help_intro.clone(),
                trigger: config.bot.help_trigger().map(str::to_owned),
            },
        }
    }
}

/// The bot host: owns the connection, the modules and their tasks.
pub struct BotHost<C: Connector> {
    connector: C,
    endpoints: Vec<Endpoint>,
    retry_delay: Duration,
    dispatcher: Dispatcher,
    handle: BotHandle,
    outbox: OutboxReceiver,
    tasks: TaskTracker,
    shutdown: CancellationToken,
    /// Task per runnable module, keyed by registration index.
    running: HashMap<usize, JoinHandle<()>>,
    state: LinkState,
}

impl<C: Connector> BotHost<C> {
    pub fn new(settings: HostSettings, connector: C) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            connector,
            endpoints: settings.endpoints,
            retry_delay: settings.retry_delay,
            dispatcher: Dispatcher::new(settings.help),
            handle: BotHandle::new(state::shared(&settings.nick), tx),
            outbox: rx,
            tasks: TaskTracker::new(),
            shutdown: CancellationToken::new(),
            running: HashMap::new(),
            state: LinkState::Disconnected,
        }
    }

    pub fn add_module(&mut self, module: Arc<dyn Module>) {
        self.dispatcher.add_module(module);
    }

    pub fn set_help_intro(&mut self, intro: &str) {
        self.dispatcher.set_help_intro(intro);
    }

    /// A handle usable from outside the event path (signal handlers, tests).
    pub fn handle(&self) -> BotHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Number of module tasks still alive.
    pub fn active_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn build_help(&self, nick: &str, in_private: bool) -> Vec<String> {
        self.dispatcher.build_help(&self.handle, nick, in_private)
    }

    fn transition(&mut self, next: LinkState) {
        debug!(from = ?self.state, to = ?next, "Link state transition");
        self.state = next;
    }

    /// Tries every endpoint in turn until one accepts us.
    ///
    /// Only gives up when a quit was requested meanwhile, or when there is
    /// no endpoint to try.
    pub async fn connect(&mut self) -> Option<C::Session> {
        if self.endpoints.is_empty() {
            warn!("No endpoint configured, nothing to connect to");
            return None;
        }
        self.transition(LinkState::Connecting);
        let mut i = 0;
        loop {
            let endpoint = &self.endpoints[i];
            info!(endpoint = %endpoint, "Connecting");
            match self
                .connector
                .connect(endpoint, self.handle.shared_state())
                .await
            {
                Ok(session) => {
                    self.transition(LinkState::Connected);
                    return Some(session);
                }
                Err(e) if e.is_transport() => {
                    error!(endpoint = %endpoint, error = %e, "Connection attempt failed");
                }
                Err(e) => {
                    warn!(endpoint = %endpoint, error = %e, "Server refused the connection");
                }
            }
            if self.handle.quit_requested() {
                info!("Quit requested while connecting, giving up");
                return None;
            }
            i = (i + 1) % self.endpoints.len();
            if !self.retry_delay.is_zero() {
                tokio::time::sleep(self.retry_delay).await;
            }
        }
    }

    /// Runs until a requested quit has been fully processed.
    pub async fn run(&mut self) {
        if self.endpoints.is_empty() {
            error!("No endpoint configured, nothing to connect to");
            self.transition(LinkState::Terminated);
            return;
        }

        loop {
            let Some(mut session) = self.connect().await else {
                self.transition(LinkState::Disconnected);
                self.shutdown().await;
                return;
            };
            self.on_connected();

            while let Some(event) = session.next_event(&mut self.outbox).await {
                self.dispatcher.dispatch(&self.handle, &event);
            }
            drop(session);

            self.transition(LinkState::Disconnected);
            info!("Bot disconnected");
            self.handle.shared_state().write().clear_channels();
            self.dispatcher.dispatch_disconnect(&self.handle);

            if self.handle.quit_requested() {
                self.shutdown().await;
                return;
            }
            info!("Unexpected disconnection detected, reconnecting");
        }
    }

    fn on_connected(&mut self) {
        info!(nick = %self.handle.nick(), "Connected");

        // Modules must see the connection before their tasks start acting.
        self.dispatcher.dispatch_connect(&self.handle);
        self.start_tasks();
    }

    fn start_tasks(&mut self) {
        for (idx, module) in self.dispatcher.modules().iter().enumerate() {
            if module.runnable().is_none() {
                continue;
            }
            if self.running.get(&idx).is_some_and(|task| !task.is_finished()) {
                debug!(module = %module.name(), "Module task still running, not relaunching");
                continue;
            }

            info!(module = %module.name(), "Launching module task");
            let module = Arc::clone(module);
            let bot = self.handle.clone();
            let stop = self.shutdown.child_token();
            let task = self.tasks.spawn(async move {
                if let Some(runnable) = module.runnable() {
                    runnable.run(bot, stop).await;
                }
                debug!(module = %module.name(), "Module task finished");
            });
            self.running.insert(idx, task);
        }
    }

    /// Stops modules cooperatively and waits a bounded time for their tasks.
    async fn shutdown(&mut self) {
        self.transition(LinkState::ShuttingDown);

        for module in self.dispatcher.modules() {
            if let Some(stoppable) = module.stoppable() {
                debug!(module = %module.name(), "Stopping module");
                stoppable.stop();
            }
        }
        self.shutdown.cancel();
        self.tasks.close();

        let mut checks = 0;
        while checks < SHUTDOWN_CHECKS && !self.tasks.is_empty() {
            checks += 1;
            if timeout(SHUTDOWN_CHECK_INTERVAL, self.tasks.wait()).await.is_err() {
                debug!(check = checks, remaining = self.tasks.len(), "Module tasks still running");
            }
        }

        if !self.tasks.is_empty() {
            warn!(
                remaining = self.tasks.len(),
                "One or more module tasks are still running, abandoning them"
            );
        }

        info!("Exiting");
        self.transition(LinkState::Terminated);
    }
}
