//! Network module.
//!
//! The lifecycle manager only knows the [`Connector`] and [`Session`]
//! traits; [`IrcConnector`] and [`IrcSession`] are the TCP implementations.

mod codec;
mod connector;
mod session;
mod translate;

pub use codec::{IrcLineCodec, MAX_LINE_LEN};
pub use connector::{Identity, IrcConnector};
pub use session::IrcSession;
pub use translate::translate;

use async_trait::async_trait;

use crate::config::Endpoint;
use crate::error::ConnectError;
use crate::host::{Event, OutboxReceiver};
use crate::state::SharedState;

/// Opens one session against one endpoint.
#[async_trait]
pub trait Connector: Send + Sync {
    type Session: Session;

    /// Connects and registers. On success the shared state holds the nick
    /// the server accepted and no channels.
    async fn connect(
        &self,
        endpoint: &Endpoint,
        state: &SharedState,
    ) -> Result<Self::Session, ConnectError>;
}

/// A registered connection.
#[async_trait]
pub trait Session: Send {
    /// Waits for the next inbound event while flushing queued outbound
    /// messages. `None` means the link is gone.
    async fn next_event(&mut self, outbox: &mut OutboxReceiver) -> Option<Event>;
}
