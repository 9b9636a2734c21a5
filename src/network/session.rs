//! Registered IRC session: reads lines, answers PING, flushes the outbox.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use super::Session;
use super::connector::IrcFramed;
use super::translate::translate;
use crate::host::{Event, OutboxReceiver};
use crate::proto::Message;
use crate::state::SharedState;

/// How long we wait for the server to close the link after our QUIT.
const QUIT_LINGER: Duration = Duration::from_secs(10);

pub struct IrcSession {
    framed: IrcFramed,
    state: SharedState,
    pending: VecDeque<Event>,
    quit_deadline: Option<Instant>,
}

impl IrcSession {
    pub(super) fn new(framed: IrcFramed, state: SharedState) -> Self {
        Self {
            framed,
            state,
            pending: VecDeque::new(),
            quit_deadline: None,
        }
    }

    /// Handles one inbound line; false when the link broke while answering.
    async fn handle_line(&mut self, line: &str) -> bool {
        let message: Message = match line.parse() {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, "Ignoring unparsable line");
                return true;
            }
        };

        if message.command == "PING" {
            let token = message.param(0).unwrap_or_default();
            return self.write(&Message::pong(token)).await;
        }

        let events = translate(&message, &mut self.state.write());
        self.pending.extend(events);
        true
    }

    async fn write(&mut self, message: &Message) -> bool {
        if message.command == "QUIT" {
            self.quit_deadline = Some(Instant::now() + QUIT_LINGER);
        }
        match self.framed.send(message.to_string()).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, command = %message.command, "Failed to write to server");
                false
            }
        }
    }
}

#[async_trait]
impl Session for IrcSession {
    async fn next_event(&mut self, outbox: &mut OutboxReceiver) -> Option<Event> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            let deadline = self.quit_deadline;
            let linger = async move {
                match deadline {
                    Some(deadline) => sleep_until(deadline).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                line = self.framed.next() => match line {
                    Some(Ok(line)) => {
                        if !self.handle_line(&line).await {
                            return None;
                        }
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "Read error, dropping the link");
                        return None;
                    }
                    None => {
                        info!("Server closed the connection");
                        return None;
                    }
                },
                Some(message) = outbox.recv() => {
                    if !self.write(&message).await {
                        return None;
                    }
                }
                () = linger => {
                    warn!("Server kept the link open after QUIT, closing it");
                    return None;
                }
            }
        }
    }
}
