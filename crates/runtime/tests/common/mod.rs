//! Transport fakes shared by the integration tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use roulette_core::PlayerId;
use roulette_runtime::{InputPrompt, Messenger, SessionId};

/// Routes runtime logs through the test harness; honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Records every outbound message instead of talking to a chat platform.
#[derive(Default)]
pub struct ChatLog {
    sent: Mutex<Vec<(SessionId, String)>>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|text| text.contains(needle))
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl Messenger for ChatLog {
    async fn send_text(&self, session: &SessionId, text: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((session.clone(), text.to_owned()));
    }

    fn mention(&self, user: &PlayerId) -> String {
        format!("@{user}")
    }
}

/// Replays a scripted sequence of prompt replies; `None` simulates a
/// timeout. An exhausted script also times out.
#[derive(Default)]
pub struct ScriptedPrompt {
    replies: Mutex<VecDeque<Option<String>>>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, reply: Option<&str>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(reply.map(str::to_owned));
    }
}

#[async_trait]
impl InputPrompt for ScriptedPrompt {
    async fn await_reply(
        &self,
        _session: &SessionId,
        _from: &PlayerId,
        _timeout: Duration,
    ) -> Option<String> {
        self.replies.lock().unwrap().pop_front().flatten()
    }
}
