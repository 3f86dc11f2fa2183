//! Join-timeout supervision for sessions stuck waiting for a second player.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use roulette_core::PlayerId;

use crate::render;
use crate::store::SessionStore;
use crate::transport::{Messenger, SessionId};

/// Schedules one deferred check: if the session still exists and is still
/// waiting after `wait`, it is deleted and the creator is notified.
///
/// The check is check-then-act under the session lock, so it cannot race a
/// concurrent join or start: a session that left Waiting before the
/// deadline is left alone.
pub fn spawn_join_timeout(
    store: Arc<SessionStore>,
    messenger: Arc<dyn Messenger>,
    session_id: SessionId,
    creator: PlayerId,
    wait: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(wait).await;

        let Some(session) = store.get(&session_id).await else {
            return;
        };
        let session = session.lock().await;
        if !session.is_waiting() {
            debug!(session = %session_id, "join timeout elapsed but the game moved on");
            return;
        }

        info!(session = %session_id, "no second player joined in time, cancelling");
        store.remove(&session_id).await;
        drop(session);

        let notice = render::join_timeout(&messenger.mention(&creator));
        messenger.send_text(&session_id, &notice).await;
    })
}
