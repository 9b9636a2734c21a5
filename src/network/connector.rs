//! TCP connector with the IRC registration handshake.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::codec::Framed;
use tracing::{debug, info};

use super::Connector;
use super::codec::IrcLineCodec;
use super::session::IrcSession;
use crate::config::{BotConfig, Endpoint};
use crate::error::ConnectError;
use crate::proto::{Message, numeric};
use crate::state::SharedState;

pub(super) type IrcFramed = Framed<TcpStream, IrcLineCodec>;

/// Who we register as.
#[derive(Debug, Clone)]
pub struct Identity {
    pub nick: String,
    pub username: String,
    pub realname: String,
    pub password: Option<String>,
}

impl Identity {
    pub fn from_config(bot: &BotConfig) -> Self {
        Self {
            nick: bot.nick.clone(),
            username: bot.username().to_owned(),
            realname: bot.realname.clone(),
            password: bot.password.clone(),
        }
    }
}

pub struct IrcConnector {
    identity: Identity,
    registration_timeout: Duration,
}

impl IrcConnector {
    pub fn new(identity: Identity, registration_timeout: Duration) -> Self {
        Self {
            identity,
            registration_timeout,
        }
    }

    async fn establish(&self, endpoint: &Endpoint) -> Result<(IrcFramed, String), ConnectError> {
        let stream = TcpStream::connect((endpoint.host.as_str(), endpoint.port)).await?;
        let mut framed = Framed::new(stream, IrcLineCodec::new());

        if let Some(ref password) = self.identity.password {
            framed
                .send(Message::new("PASS", vec![password.clone()]).to_string())
                .await?;
        }
        framed.send(Message::nick(&self.identity.nick).to_string()).await?;
        framed
            .send(Message::user(&self.identity.username, &self.identity.realname).to_string())
            .await?;

        let nick = register(&mut framed, &self.identity.nick).await?;
        Ok((framed, nick))
    }
}

#[async_trait]
impl Connector for IrcConnector {
    type Session = IrcSession;

    async fn connect(
        &self,
        endpoint: &Endpoint,
        state: &SharedState,
    ) -> Result<IrcSession, ConnectError> {
        // The TCP connect counts against the registration timeout too.
        let (framed, nick) = timeout(self.registration_timeout, self.establish(endpoint))
            .await
            .map_err(|_| ConnectError::RegistrationTimeout)??;

        info!(endpoint = %endpoint, nick = %nick, "Registered with server");
        {
            let mut state = state.write();
            state.set_nick(&nick);
            state.clear_channels();
        }
        Ok(IrcSession::new(framed, state.clone()))
    }
}

/// Waits for RPL_WELCOME and returns the nick the server accepted.
async fn register(framed: &mut IrcFramed, wanted: &str) -> Result<String, ConnectError> {
    let mut attempted = wanted.to_owned();

    loop {
        let line = match framed.next().await {
            Some(line) => line?,
            None => return Err(ConnectError::ClosedDuringRegistration),
        };
        let message: Message = match line.parse() {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, "Ignoring unparsable line during registration");
                continue;
            }
        };

        match (message.command.as_str(), message.numeric()) {
            ("PING", _) => {
                let token = message.param(0).unwrap_or_default();
                framed.send(Message::pong(token).to_string()).await?;
            }
            ("ERROR", _) => {
                let reason = message.param(0).unwrap_or("no reason given");
                return Err(ConnectError::Refused(reason.to_owned()));
            }
            (_, Some(numeric::RPL_WELCOME)) => {
                return Ok(message.param(0).unwrap_or(&attempted).to_owned());
            }
            (_, Some(numeric::ERR_NICKNAMEINUSE | numeric::ERR_ERRONEUSNICKNAME)) => {
                attempted.push('_');
                info!(nick = %attempted, "Nickname rejected, retrying");
                framed.send(Message::nick(&attempted).to_string()).await?;
            }
            _ => {}
        }
    }
}
