//! The turn/action resolution engine.
//!
//! [`GameEngine`] is the authoritative reducer for [`GameState`]: fires,
//! item uses, and magazine regeneration all flow through it. Every method
//! returns a structured outcome the runtime renders into chat narrative;
//! the engine itself never produces text and never performs I/O.

mod items;

pub use items::{ItemEffect, ItemUse};

use rand::Rng;

use crate::config::GameConfig;
use crate::rng;
use crate::state::{GameState, Player, Round, Seat};

/// Where the current player points the gun.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum FireTarget {
    #[strum(serialize = "self", serialize = "me", serialize = "myself")]
    Myself,
    #[strum(serialize = "opponent", serialize = "them", serialize = "other")]
    Opponent,
}

/// Terminal result: one player's hp reached zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOver {
    pub winner: Seat,
    pub loser: Seat,
}

/// Summary of one magazine regeneration event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reload {
    /// Cycle counter after the increment.
    pub round_number: u32,
    pub magazine_len: usize,
    pub live: usize,
    pub blank: usize,
    /// Items granted to each player (identical count, independent draws).
    pub items_granted: u8,
}

/// How control moved after a resolved shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnFlow {
    /// Blank self-shot: the same player acts again.
    Retained,
    /// Control passed to the opponent.
    Passed,
    /// The opponent was handcuffed; the cuff is spent and the shooter
    /// keeps the turn.
    OpponentSkipped,
}

/// The round drawn by a fire and the damage it dealt (0 for a blank).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shot {
    pub round: Round,
    pub damage: u8,
}

/// Complete outcome of one fire call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FireOutcome {
    pub target: FireTarget,
    /// `None` when the magazine was already empty: no shot resolved, only
    /// a regeneration, and the caller should prompt for a new action.
    pub shot: Option<Shot>,
    /// `None` when no shot resolved or the game ended.
    pub turn: Option<TurnFlow>,
    /// Present when this call emptied (or found empty) the magazine.
    pub reload: Option<Reload>,
    pub game_over: Option<GameOver>,
}

/// Initial setup summary produced by [`start_game`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartReport {
    pub first: Seat,
    /// Items granted to the first player to act (`base - 1`).
    pub first_items: u8,
    /// Items granted to the player acting second (`base`).
    pub second_items: u8,
    pub magazine_len: usize,
    pub live: usize,
    pub blank: usize,
}

/// Rolls the initial magazine, turn order, and item grants for two players.
pub fn start_game<R: Rng + ?Sized>(
    players: [Player; 2],
    config: &GameConfig,
    rng: &mut R,
) -> (GameState, StartReport) {
    let magazine = rng::generate_magazine(config, rng);
    let first = rng::first_seat(rng);
    let base = rng::start_grant_base(config, rng);

    let mut state = GameState::new(players, first, magazine);
    for _ in 0..base.saturating_sub(1) {
        let item = rng::draw_item(rng);
        state.player_mut(first).grant(item);
    }
    for _ in 0..base {
        let item = rng::draw_item(rng);
        state.player_mut(first.other()).grant(item);
    }

    let (live, blank) = state.magazine_counts();
    let report = StartReport {
        first,
        first_items: base - 1,
        second_items: base,
        magazine_len: state.magazine.len(),
        live,
        blank,
    };
    (state, report)
}

/// Authoritative reducer over a started game's state.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    /// Resolves one trigger pull by the current player.
    pub fn fire<R: Rng + ?Sized>(&mut self, target: FireTarget, rng: &mut R) -> FireOutcome {
        let Some(round) = self.state.magazine.pop() else {
            // Nothing chambered: regenerate instead of resolving a shot.
            // The turn does not advance and the saw stays armed.
            let reload = self.reload(rng);
            return FireOutcome {
                target,
                shot: None,
                turn: None,
                reload: Some(reload),
                game_over: None,
            };
        };

        let mut damage = 0;
        if round == Round::Live {
            damage = if self.state.double_damage_armed { 2 } else { 1 };
            let victim = match target {
                FireTarget::Myself => self.state.current,
                FireTarget::Opponent => self.state.current.other(),
            };
            let player = self.state.player_mut(victim);
            player.hp = (player.hp - damage as i8).max(0);

            if !player.is_alive() {
                // Terminal: turn-switch logic and trailing regeneration are
                // skipped, the session is gone after this outcome.
                return FireOutcome {
                    target,
                    shot: Some(Shot { round, damage }),
                    turn: None,
                    reload: None,
                    game_over: Some(GameOver {
                        winner: victim.other(),
                        loser: victim,
                    }),
                };
            }
        }

        let turn = self.settle_turn(target, round);
        self.state.double_damage_armed = false;

        let reload = self
            .state
            .magazine
            .is_empty()
            .then(|| self.reload(rng));

        FireOutcome {
            target,
            shot: Some(Shot { round, damage }),
            turn: Some(turn),
            reload,
            game_over: None,
        }
    }

    /// Turn continuation after a non-terminal shot.
    fn settle_turn(&mut self, target: FireTarget, round: Round) -> TurnFlow {
        if target == FireTarget::Myself && round == Round::Blank {
            return TurnFlow::Retained;
        }

        let opponent = self.state.current.other();
        if self.state.player(opponent).handcuffed {
            self.state.player_mut(opponent).handcuffed = false;
            self.state.handcuff_used_this_turn = false;
            TurnFlow::OpponentSkipped
        } else {
            self.state.current = opponent;
            self.state.handcuff_used_this_turn = false;
            TurnFlow::Passed
        }
    }

    /// Regenerates the magazine and grants both players fresh items.
    fn reload<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Reload {
        self.state.round_number += 1;
        self.state.magazine = rng::generate_magazine(self.config, rng);

        let count = rng::reload_grant_count(self.config, rng);
        for seat in [Seat::One, Seat::Two] {
            for _ in 0..count {
                let item = rng::draw_item(rng);
                self.state.player_mut(seat).grant(item);
            }
        }

        let (live, blank) = self.state.magazine_counts();
        Reload {
            round_number: self.state.round_number,
            magazine_len: self.state.magazine.len(),
            live,
            blank,
            items_granted: count,
        }
    }
}
