//! Session runtime for the roulette duel engine.
//!
//! This crate wires the pure core (`roulette-core`) into a chat context:
//! the session store and its two-level locking, the join-timeout
//! supervisor, free-text command classification, the adrenaline prompt
//! orchestration, and presentation. The chat platform itself stays behind
//! the [`Messenger`] and [`InputPrompt`] traits so hosts (and tests)
//! inject their own transport.
pub mod config;
pub mod error;
pub mod render;
pub mod service;
pub mod session;
pub mod store;
pub mod supervisor;
pub mod transport;

pub use config::RuntimeConfig;
pub use error::{EngineError, Result};
pub use service::GameService;
pub use session::{Session, SessionPhase};
pub use store::{SessionStore, SharedSession};
pub use transport::{InputPrompt, Messenger, SessionId};
