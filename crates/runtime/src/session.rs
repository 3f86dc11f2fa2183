//! One pending or active game, keyed by its chat.

use roulette_core::{GameState, Player, PlayerId};

use crate::transport::SessionId;

/// Lifecycle phase of a session. "Finished" has no variant: a finished
/// game is removed from the store.
#[derive(Clone, Debug)]
pub enum SessionPhase {
    /// Created, waiting for a second player to join.
    Waiting { creator: Player },
    /// Two players present, waiting for the creator to start.
    Full { creator: Player, joiner: Player },
    /// Game running; all further mutation goes through the core engine.
    Started { game: GameState },
}

/// A session entity owned by the store.
#[derive(Clone, Debug)]
pub struct Session {
    pub id: SessionId,
    pub phase: SessionPhase,
}

impl Session {
    pub fn new(id: SessionId, creator: Player) -> Self {
        Self {
            id,
            phase: SessionPhase::Waiting { creator },
        }
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.phase, SessionPhase::Waiting { .. })
    }

    /// Whether the user is one of the (up to two) participants.
    pub fn is_participant(&self, id: &PlayerId) -> bool {
        match &self.phase {
            SessionPhase::Waiting { creator } => creator.id == *id,
            SessionPhase::Full { creator, joiner } => creator.id == *id || joiner.id == *id,
            SessionPhase::Started { game } => game.seat_of(id).is_some(),
        }
    }
}
