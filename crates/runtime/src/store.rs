//! Session store: the top-level map from chat id to session entity.
//!
//! Locking is two-level: the map has its own mutex for insertion, lookup,
//! and deletion, and each session sits behind its own `Arc<Mutex<_>>` that
//! serializes every mutating call on that session, including calls that
//! suspend mid-action, like the adrenaline prompt. The map lock is never
//! held across an await on a session lock, so sessions stay independent.
//!
//! Lock order: a session lock may be held while taking the map lock (for
//! removal), never the other way around.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use roulette_core::{GameConfig, Player, PlayerId, StartReport, start_game};

use crate::config::RuntimeConfig;
use crate::error::{EngineError, Result};
use crate::session::{Session, SessionPhase};
use crate::transport::SessionId;

pub type SharedSession = Arc<Mutex<Session>>;

/// Owns every live session. Injected into the service and the supervisor
/// rather than held as ambient state.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, SharedSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session in the Waiting phase.
    ///
    /// Fails with `AlreadyExists` whatever the existing session's status;
    /// the error carries whether that session is still joinable so the
    /// reply can invite the sender to join instead.
    pub async fn create(&self, id: SessionId, creator: Player) -> Result<SharedSession> {
        let existing = {
            let mut map = self.sessions.lock().await;
            match map.get(&id) {
                Some(session) => Err(Arc::clone(session)),
                None => {
                    let session = Arc::new(Mutex::new(Session::new(id.clone(), creator)));
                    map.insert(id.clone(), Arc::clone(&session));
                    Ok(session)
                }
            }
        };

        match existing {
            Ok(session) => {
                info!(session = %id, "session created, waiting for a second player");
                Ok(session)
            }
            Err(session) => {
                let joinable = session.lock().await.is_waiting();
                Err(EngineError::AlreadyExists { joinable })
            }
        }
    }

    /// Fills the second seat: Waiting -> Full.
    ///
    /// Returns a snapshot of the session for rendering.
    pub async fn join(&self, id: &SessionId, joiner: Player) -> Result<Session> {
        let session = self.get(id).await.ok_or(EngineError::NotFound)?;
        let mut session = session.lock().await;

        let SessionPhase::Waiting { creator } = &session.phase else {
            return Err(EngineError::NotWaiting);
        };
        if creator.id == joiner.id {
            return Err(EngineError::SelfJoin);
        }

        info!(session = %id, joiner = %joiner.id, "second player joined");
        session.phase = SessionPhase::Full {
            creator: creator.clone(),
            joiner,
        };
        Ok(session.clone())
    }

    /// Rolls the opening state: Full -> Started. Creator only.
    ///
    /// Returns the start report and a snapshot of the started session.
    pub async fn start(
        &self,
        id: &SessionId,
        requester: &PlayerId,
        config: &GameConfig,
        rng: &mut (impl rand::Rng + ?Sized),
    ) -> Result<(StartReport, Session)> {
        let session = self.get(id).await.ok_or(EngineError::NotFound)?;
        let mut session = session.lock().await;

        let SessionPhase::Full { creator, joiner } = &session.phase else {
            return Err(EngineError::NotFull);
        };
        if creator.id != *requester {
            return Err(EngineError::NotCreator);
        }

        let players = [creator.clone(), joiner.clone()];
        let (game, report) = start_game(players, config, rng);
        info!(
            session = %id,
            first = ?report.first,
            magazine = report.magazine_len,
            "game started"
        );
        session.phase = SessionPhase::Started { game };
        Ok((report, session.clone()))
    }

    /// Deletes the session regardless of phase. Participants and admins
    /// only. Returns a snapshot of what was removed.
    pub async fn end(
        &self,
        id: &SessionId,
        requester: &PlayerId,
        config: &RuntimeConfig,
    ) -> Result<Session> {
        let session = self.get(id).await.ok_or(EngineError::NotFound)?;
        let session = session.lock().await;

        if !session.is_participant(requester) && !config.is_admin(requester) {
            return Err(EngineError::Unauthorized);
        }

        info!(session = %id, requester = %requester, "session force-ended");
        let snapshot = session.clone();
        self.remove(id).await;
        Ok(snapshot)
    }

    /// Read access for status display and free-text dispatch.
    pub async fn get(&self, id: &SessionId) -> Option<SharedSession> {
        self.sessions.lock().await.get(id).map(Arc::clone)
    }

    /// Unconditional removal, used for natural game-over and the join
    /// timeout. Safe to call while holding the session's own lock.
    pub async fn remove(&self, id: &SessionId) {
        if self.sessions.lock().await.remove(id).is_some() {
            debug!(session = %id, "session removed");
        }
    }
}
