//! Seams to the chat platform.
//!
//! The engine never talks to a messaging backend directly; the host
//! application injects these two traits. Tests inject recording fakes.

use std::time::Duration;

use async_trait::async_trait;

use roulette_core::PlayerId;

/// Opaque channel/conversation identifier. One session per chat.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outbound chat transport.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a block of text to the session's chat.
    async fn send_text(&self, session: &SessionId, text: &str);

    /// Renders an inline mention fragment for a user.
    fn mention(&self, user: &PlayerId) -> String;
}

/// Timed short-reply collection from a specific user.
#[async_trait]
pub trait InputPrompt: Send + Sync {
    /// Waits up to `timeout` for the next message from `from` in `session`.
    /// `None` means the deadline elapsed.
    async fn await_reply(
        &self,
        session: &SessionId,
        from: &PlayerId,
        timeout: Duration,
    ) -> Option<String>;
}
