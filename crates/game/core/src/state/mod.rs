//! Authoritative state of a started game.
//!
//! The state owns the data; all mutation flows through
//! [`crate::engine::GameEngine`]. There is no "player1"/"player2" string
//! indirection: the two participants live in a fixed array indexed by
//! [`Seat`].

mod player;

pub use player::{Player, PlayerId};

/// A single chamber outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Round {
    Live,
    Blank,
}

impl Round {
    /// Live <=> Blank.
    pub const fn flipped(self) -> Self {
        match self {
            Round::Live => Round::Blank,
            Round::Blank => Round::Live,
        }
    }
}

/// Which of the two fixed player slots is meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    /// The opposing seat.
    pub const fn other(self) -> Self {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    const fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }
}

/// Canonical snapshot of a started game.
///
/// The back of `magazine` is the chambered round: fires and ejections pop
/// from the end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    players: [Player; 2],
    pub magazine: Vec<Round>,
    /// Seat that acts next.
    pub current: Seat,
    /// Consumed by the next live hit, cleared after every resolved fire.
    pub double_damage_armed: bool,
    /// Count of magazine-exhaustion cycles so far.
    pub round_number: u32,
    /// Guards against applying handcuffs twice before a turn switch.
    pub handcuff_used_this_turn: bool,
}

impl GameState {
    /// Creates a started game with the given first actor and magazine.
    pub fn new(players: [Player; 2], first: Seat, magazine: Vec<Round>) -> Self {
        Self {
            players,
            magazine,
            current: first,
            double_damage_armed: false,
            round_number: 0,
            handcuff_used_this_turn: false,
        }
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    /// Seat occupied by the given user, if they are in this game.
    pub fn seat_of(&self, id: &PlayerId) -> Option<Seat> {
        if self.player(Seat::One).id == *id {
            Some(Seat::One)
        } else if self.player(Seat::Two).id == *id {
            Some(Seat::Two)
        } else {
            None
        }
    }

    /// Live and blank counts of the current magazine.
    pub fn magazine_counts(&self) -> (usize, usize) {
        let live = self
            .magazine
            .iter()
            .filter(|round| **round == Round::Live)
            .count();
        (live, self.magazine.len() - live)
    }
}
