//! Unified error types surfaced by the session engine.
//!
//! Every variant is recoverable and user-facing: callers report
//! [`EngineError::reply`] back to the requester and the failed call has
//! mutated nothing.

use thiserror::Error;

use roulette_core::ItemError;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("a game already exists in this chat")]
    AlreadyExists {
        /// Whether the existing game is still waiting for a second player,
        /// which changes the reply (an invite to join instead of a refusal).
        joinable: bool,
    },

    #[error("no game exists in this chat")]
    NotFound,

    #[error("the game is no longer waiting for players")]
    NotWaiting,

    #[error("the game does not have two players yet")]
    NotFull,

    #[error("only the creator can start the game")]
    NotCreator,

    #[error("you cannot join your own game")]
    SelfJoin,

    #[error("only a participant or an admin can end the game")]
    Unauthorized,

    #[error("timed out waiting for a reply")]
    TimedOut,

    #[error(transparent)]
    Item(#[from] ItemError),
}

impl EngineError {
    /// The chat message sent to the requester when an operation fails.
    pub fn reply(&self) -> String {
        match self {
            EngineError::AlreadyExists { joinable: true } => {
                "A game here is waiting for a second player. Send \"join\" to get in.".to_owned()
            }
            EngineError::AlreadyExists { joinable: false } => {
                "A game is already in progress here.".to_owned()
            }
            EngineError::NotFound => "There is no game here. Create one first.".to_owned(),
            EngineError::NotWaiting => "The game is full or already running.".to_owned(),
            EngineError::NotFull => "Still waiting for a second player.".to_owned(),
            EngineError::NotCreator => "Only player 1 can start the game.".to_owned(),
            EngineError::SelfJoin => "You cannot join your own game.".to_owned(),
            EngineError::Unauthorized => {
                "Only a participant or an admin can end the game.".to_owned()
            }
            EngineError::TimedOut => "Timed out, adrenaline use cancelled.".to_owned(),
            EngineError::Item(err) => format!("{err}, use cancelled."),
        }
    }
}
