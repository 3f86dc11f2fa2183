//! Deterministic game logic for the two-player roulette duel.
//!
//! `roulette-core` defines the canonical rules: the magazine, the item
//! catalog, fire resolution, and regeneration. All state mutation flows
//! through [`engine::GameEngine`], randomness is injected so every outcome
//! is reproducible, and nothing here performs I/O; the runtime crate owns
//! sessions, timers, and chat transport.
pub mod config;
pub mod engine;
pub mod error;
pub mod item;
pub mod rng;
pub mod state;

pub use config::GameConfig;
pub use engine::{
    FireOutcome, FireTarget, GameEngine, GameOver, ItemEffect, ItemUse, Reload, Shot, StartReport,
    TurnFlow, start_game,
};
pub use error::ItemError;
pub use item::ItemKind;
pub use state::{GameState, Player, PlayerId, Round, Seat};
