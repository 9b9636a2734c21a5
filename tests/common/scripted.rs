//! Scripted transport.
//!
//! Each connection attempt either fails or yields a session replaying raw
//! server lines through the real translator. Once its script is exhausted a
//! session idles until the bot sends QUIT.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use slircbot::config::Endpoint;
use slircbot::error::ConnectError;
use slircbot::host::{Event, OutboxReceiver};
use slircbot::network::{Connector, Session, translate};
use slircbot::proto::Message;
use slircbot::state::SharedState;

/// Outcome of one connection attempt.
pub enum Attempt {
    Fail,
    Refuse(&'static str),
    Accept(Vec<Step>),
}

pub enum Step {
    /// A raw line from the server.
    Line(&'static str),
    Sleep(Duration),
    /// The server drops the link.
    Drop,
}

#[derive(Clone, Default)]
pub struct ScriptedConnector {
    attempts: Arc<Mutex<VecDeque<Attempt>>>,
    tried: Arc<Mutex<Vec<String>>>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConnector {
    pub fn new(attempts: Vec<Attempt>) -> Self {
        Self {
            attempts: Arc::new(Mutex::new(attempts.into())),
            ..Self::default()
        }
    }

    /// Endpoints in the order they were tried.
    pub fn tried(&self) -> Vec<String> {
        self.tried.lock().clone()
    }

    /// Every line the bot wrote, across sessions.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    type Session = ScriptedSession;

    async fn connect(
        &self,
        endpoint: &Endpoint,
        state: &SharedState,
    ) -> Result<ScriptedSession, ConnectError> {
        self.tried.lock().push(endpoint.to_string());
        let attempt = self.attempts.lock().pop_front().unwrap_or(Attempt::Fail);
        match attempt {
            Attempt::Fail => Err(ConnectError::Io(std::io::Error::from(
                std::io::ErrorKind::ConnectionRefused,
            ))),
            Attempt::Refuse(reason) => Err(ConnectError::Refused(reason.to_owned())),
            Attempt::Accept(steps) => {
                state.write().clear_channels();
                Ok(ScriptedSession {
                    state: state.clone(),
                    steps: steps.into(),
                    pending: VecDeque::new(),
                    sent: Arc::clone(&self.sent),
                })
            }
        }
    }
}

pub struct ScriptedSession {
    state: SharedState,
    steps: VecDeque<Step>,
    pending: VecDeque<Event>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSession {
    /// Records one outbound message; false once QUIT went out.
    fn record(&self, message: Message) -> bool {
        let quitting = message.command == "QUIT";
        self.sent.lock().push(message.to_string());
        !quitting
    }

    fn flush(&self, outbox: &mut OutboxReceiver) -> bool {
        while let Ok(message) = outbox.try_recv() {
            if !self.record(message) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl Session for ScriptedSession {
    async fn next_event(&mut self, outbox: &mut OutboxReceiver) -> Option<Event> {
        loop {
            if !self.flush(outbox) {
                return None;
            }
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            match self.steps.pop_front() {
                Some(Step::Line(raw)) => {
                    let message: Message = raw.parse().expect("scripted line parses");
                    let events = translate(&message, &mut self.state.write());
                    self.pending.extend(events);
                }
                Some(Step::Sleep(duration)) => tokio::time::sleep(duration).await,
                Some(Step::Drop) => return None,
                None => {
                    let message = outbox.recv().await?;
                    if !self.record(message) {
                        return None;
                    }
                }
            }
        }
    }
}
