//! Integration test common infrastructure.
//!
//! Provides a scripted transport for driving the bot host without a
//! network, and a fake IRC server for exercising the TCP connector.

pub mod scripted;
pub mod server;

#[allow(unused_imports)]
pub use scripted::{Attempt, ScriptedConnector, Step};
#[allow(unused_imports)]
pub use server::{FakeClient, FakeServer};
