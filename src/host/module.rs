//! The module contract.
//!
//! A [`Module`] reacts to bot events; every handler defaults to a no-op.
//! Optional behavior is declared through capability accessors instead of
//! type inspection:
//!
//! - [`Runnable`]: an independent task started after connect. Its
//!   cancellation token is its stop signal, so runnable implies stoppable.
//! - [`Stoppable`]: an explicit cooperative stop hook, called on shutdown.
//! - [`PublicTrigger`]: reacts to `!word` said in a channel.
//! - [`PrivateTrigger`]: reacts to an exact private message, optionally
//!   reserved to channel operators.
//!
//! Event handlers run on the single event path and must not block; outbound
//! traffic goes through the non-blocking [`BotHandle`] methods.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::event::User;
use super::handle::BotHandle;

#[allow(unused_variables)]
pub trait Module: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    fn on_connect(&self, bot: &BotHandle) {}

    fn on_disconnect(&self, bot: &BotHandle) {}

    fn on_topic(
        &self,
        bot: &BotHandle,
        channel: &str,
        topic: &str,
        set_by: &str,
        date: i64,
        changed: bool,
    ) {
    }

    fn on_message(&self, bot: &BotHandle, channel: &str, sender: &User, message: &str) {}

    fn on_private_message(&self, bot: &BotHandle, sender: &User, message: &str) {}

    fn on_action(&self, bot: &BotHandle, sender: &User, target: &str, action: &str) {}

    fn on_server_response(&self, bot: &BotHandle, code: u16, response: &str) {}

    fn on_join(&self, bot: &BotHandle, channel: &str, sender: &User) {}

    fn on_part(&self, bot: &BotHandle, channel: &str, sender: &User) {}

    /// `sender` carries the old nickname.
    fn on_nick_change(&self, bot: &BotHandle, sender: &User, new_nick: &str) {}

    fn on_quit(&self, bot: &BotHandle, sender: &User, reason: &str) {}

    fn on_mode(&self, bot: &BotHandle, channel: &str, source: &User, mode: &str) {}

    fn on_user_mode(&self, bot: &BotHandle, target: &str, source: &User, mode: &str) {}

    fn on_kick(
        &self,
        bot: &BotHandle,
        channel: &str,
        kicker: &User,
        recipient: &str,
        reason: &str,
    ) {
    }

    // Capabilities

    fn runnable(&self) -> Option<&dyn Runnable> {
        None
    }

    fn stoppable(&self) -> Option<&dyn Stoppable> {
        None
    }

    fn public_trigger(&self) -> Option<&dyn PublicTrigger> {
        None
    }

    fn private_trigger(&self) -> Option<&dyn PrivateTrigger> {
        None
    }
}

/// A long-running task owned by a module.
#[async_trait]
pub trait Runnable: Send + Sync {
    /// Runs until `stop` is cancelled. The handle stays valid across
    /// reconnects; messages sent while disconnected are queued.
    async fn run(&self, bot: BotHandle, stop: CancellationToken);
}

/// Cooperative stop hook.
pub trait Stoppable: Send + Sync {
    fn stop(&self);
}

/// `!word` command in a channel.
pub trait PublicTrigger: Send + Sync {
    /// Command word without the leading `!`.
    fn trigger_word(&self) -> &str;

    fn help(&self) -> Option<&str> {
        None
    }

    fn on_trigger(&self, bot: &BotHandle, channel: &str, sender: &User, message: &str);
}

/// Exact private message command.
pub trait PrivateTrigger: Send + Sync {
    fn trigger_phrase(&self) -> &str;

    fn op_required(&self) -> bool {
        false
    }

    fn on_trigger(&self, bot: &BotHandle, sender: &User, message: &str);
}
