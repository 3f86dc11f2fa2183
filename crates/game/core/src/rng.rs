//! Randomized resource generation.
//!
//! Everything random in the engine funnels through these helpers with the
//! RNG injected, so tests can drive the engine with a seeded
//! [`rand::rngs::StdRng`] and production uses `thread_rng`.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::GameConfig;
use crate::item::ItemKind;
use crate::state::{Round, Seat};

/// Generates a fresh magazine: length uniform in the configured range, each
/// round live with probability 0.5, then uniformly shuffled.
pub fn generate_magazine<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Vec<Round> {
    let (min, max) = config.magazine_len;
    let count = rng.gen_range(min..=max);
    let mut magazine: Vec<Round> = (0..count)
        .map(|_| {
            if rng.gen_bool(GameConfig::LIVE_PROBABILITY) {
                Round::Live
            } else {
                Round::Blank
            }
        })
        .collect();
    magazine.shuffle(rng);
    magazine
}

/// Draws one item uniformly from the full catalog.
pub fn draw_item<R: Rng + ?Sized>(rng: &mut R) -> ItemKind {
    ItemKind::ALL[rng.gen_range(0..ItemKind::ALL.len())]
}

/// Draws the per-player grant count for a regeneration event.
pub fn reload_grant_count<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> u8 {
    let (min, max) = config.reload_grant;
    rng.gen_range(min..=max)
}

/// Draws the base grant count used at game start.
pub fn start_grant_base<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> u8 {
    let (min, max) = config.start_grant;
    rng.gen_range(min..=max)
}

/// Picks which seat acts first.
pub fn first_seat<R: Rng + ?Sized>(rng: &mut R) -> Seat {
    if rng.gen_bool(0.5) { Seat::One } else { Seat::Two }
}

/// Even-odds roll used by expired medicine.
pub fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_bool(0.5)
}
