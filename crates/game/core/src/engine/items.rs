//! Item-use orchestration and the nine effect handlers.
//!
//! Every handler returns a unified [`ItemUse`]: the structured effect plus
//! an optional chained reload and an optional game-over signal. The caller
//! (runtime) is responsible for acting on termination; handlers only mutate
//! state and report.

use rand::Rng;

use crate::engine::{GameEngine, GameOver, Reload};
use crate::error::ItemError;
use crate::item::ItemKind;
use crate::rng;
use crate::state::{Round, Seat};

/// What an item did when used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemEffect {
    /// Saw: `was_armed` means it was already active and nothing changed.
    SawArmed { was_armed: bool },
    /// Magnifier: the chambered round, or `None` on an empty magazine.
    Peek { chambered: Option<Round> },
    /// Beer: the ejected round, or `None` on an empty magazine.
    Eject { ejected: Option<Round> },
    /// Cigarette: hp actually recovered (0 when already full).
    Smoke { healed: i8 },
    /// Handcuffs: `applied` is false when the per-turn guard blocked it.
    Cuff { applied: bool },
    /// Expired medicine: `Some(n)` is the lucky branch (n hp recovered,
    /// possibly 0 at full health), `None` means 1 hp was lost.
    Medicine { healed: Option<i8> },
    /// Inverter: the flip performed, or `None` on an empty magazine.
    Invert { flipped: Option<(Round, Round)> },
    /// Burner phone: 0-based magazine index and its round, or `None` on an
    /// empty magazine.
    PhoneCall { hint: Option<(usize, Round)> },
    /// Adrenaline: the opponent item that was forced, and its full outcome
    /// resolved with the opponent as the acting player.
    Adrenaline {
        picked: ItemKind,
        forced: Box<ItemUse>,
    },
}

/// Complete outcome of one (possibly delegated) item use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemUse {
    pub item: ItemKind,
    /// Acting context: the seat whose hp/opponent the effect applied to.
    pub actor: Seat,
    pub effect: ItemEffect,
    /// Present when the effect emptied the magazine (beer).
    pub reload: Option<Reload>,
    /// Present when the effect was fatal (expired medicine).
    pub game_over: Option<GameOver>,
}

impl<'a> GameEngine<'a> {
    /// Uses an item held by the current player.
    ///
    /// Adrenaline requires `target`: the opponent item to force. All
    /// validation happens before any mutation, so an `Err` means nothing
    /// changed and nothing was consumed.
    pub fn use_item<R: Rng + ?Sized>(
        &mut self,
        item: ItemKind,
        target: Option<ItemKind>,
        rng: &mut R,
    ) -> Result<ItemUse, ItemError> {
        let actor = self.state.current;
        if !self.state.player(actor).holds(item) {
            return Err(ItemError::NotOwned { item });
        }

        if item == ItemKind::Adrenaline {
            let picked = target.ok_or(ItemError::TargetRequired { item })?;
            return self.use_adrenaline(picked, rng);
        }

        self.state.player_mut(actor).remove_item(item);
        Ok(self.apply_effect(actor, item, rng))
    }

    /// Adrenaline: force the opponent to use `picked` on their own behalf.
    fn use_adrenaline<R: Rng + ?Sized>(
        &mut self,
        picked: ItemKind,
        rng: &mut R,
    ) -> Result<ItemUse, ItemError> {
        let actor = self.state.current;
        let opponent = actor.other();

        if picked == ItemKind::Adrenaline {
            return Err(ItemError::InvalidSelfTarget);
        }
        if !self.state.player(opponent).holds(picked) {
            return Err(ItemError::NotHeldByOpponent { item: picked });
        }

        // Validated: both items are consumed, then the opponent's item
        // resolves with the opponent as acting player.
        self.state.player_mut(actor).remove_item(ItemKind::Adrenaline);
        self.state.player_mut(opponent).remove_item(picked);
        let forced = self.apply_effect(opponent, picked, rng);

        Ok(ItemUse {
            item: ItemKind::Adrenaline,
            actor,
            effect: ItemEffect::Adrenaline {
                picked,
                forced: Box::new(forced),
            },
            reload: None,
            game_over: None,
        })
    }

    /// Resolves a direct (non-adrenaline) effect for the given acting seat.
    fn apply_effect<R: Rng + ?Sized>(
        &mut self,
        actor: Seat,
        item: ItemKind,
        rng: &mut R,
    ) -> ItemUse {
        let mut reload = None;
        let mut game_over = None;

        let effect = match item {
            ItemKind::Saw => {
                let was_armed = self.state.double_damage_armed;
                self.state.double_damage_armed = true;
                ItemEffect::SawArmed { was_armed }
            }
            ItemKind::Magnifier => ItemEffect::Peek {
                chambered: self.state.magazine.last().copied(),
            },
            ItemKind::Beer => {
                let ejected = self.state.magazine.pop();
                if ejected.is_some() && self.state.magazine.is_empty() {
                    reload = Some(self.reload(rng));
                }
                ItemEffect::Eject { ejected }
            }
            ItemKind::Cigarette => ItemEffect::Smoke {
                healed: self.state.player_mut(actor).heal(1),
            },
            ItemKind::Handcuffs => {
                if self.state.handcuff_used_this_turn {
                    ItemEffect::Cuff { applied: false }
                } else {
                    self.state.player_mut(actor.other()).handcuffed = true;
                    self.state.handcuff_used_this_turn = true;
                    ItemEffect::Cuff { applied: true }
                }
            }
            ItemKind::ExpiredMedicine => {
                if rng::coin_flip(rng) {
                    ItemEffect::Medicine {
                        healed: Some(self.state.player_mut(actor).heal(2)),
                    }
                } else {
                    let player = self.state.player_mut(actor);
                    player.hp = (player.hp - 1).max(0);
                    if !player.is_alive() {
                        game_over = Some(GameOver {
                            winner: actor.other(),
                            loser: actor,
                        });
                    }
                    ItemEffect::Medicine { healed: None }
                }
            }
            ItemKind::Inverter => {
                let flipped = self.state.magazine.last_mut().map(|round| {
                    let before = *round;
                    *round = before.flipped();
                    (before, *round)
                });
                ItemEffect::Invert { flipped }
            }
            ItemKind::BurnerPhone => {
                let hint = if self.state.magazine.is_empty() {
                    None
                } else {
                    let index = rng.gen_range(0..self.state.magazine.len());
                    Some((index, self.state.magazine[index]))
                };
                ItemEffect::PhoneCall { hint }
            }
            // Adrenaline is routed through use_adrenaline and is never a
            // direct effect.
            ItemKind::Adrenaline => unreachable!("adrenaline is not a direct effect"),
        };

        ItemUse {
            item,
            actor,
            effect,
            reload,
            game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::GameConfig;
    use crate::state::{GameState, Player};

    fn started(magazine: Vec<Round>) -> GameState {
        GameState::new(
            [Player::new("alice", "a"), Player::new("bob", "b")],
            Seat::One,
            magazine,
        )
    }

    fn give(state: &mut GameState, seat: Seat, item: ItemKind) {
        state.player_mut(seat).grant(item);
    }

    /// A seed whose first coin flip lands on the unlucky medicine branch.
    fn unlucky_seed() -> u64 {
        for seed in 0..64 {
            let mut trial = StdRng::seed_from_u64(seed);
            if !rng::coin_flip(&mut trial) {
                return seed;
            }
        }
        unreachable!("no unlucky seed in the first 64");
    }

    #[test]
    fn using_an_item_you_do_not_hold_fails_without_mutation() {
        let config = GameConfig::default();
        let mut state = started(vec![Round::Live]);
        let before = state.clone();
        let mut rng = StdRng::seed_from_u64(1);

        let err = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Saw, None, &mut rng)
            .unwrap_err();

        assert_eq!(err, ItemError::NotOwned { item: ItemKind::Saw });
        assert_eq!(state, before);
    }

    #[test]
    fn saw_arms_once_and_rearming_is_idempotent() {
        let config = GameConfig::default();
        let mut state = started(vec![Round::Live]);
        give(&mut state, Seat::One, ItemKind::Saw);
        give(&mut state, Seat::One, ItemKind::Saw);
        let mut rng = StdRng::seed_from_u64(2);

        let first = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Saw, None, &mut rng)
            .unwrap();
        assert_eq!(first.effect, ItemEffect::SawArmed { was_armed: false });
        assert!(state.double_damage_armed);

        let second = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Saw, None, &mut rng)
            .unwrap();
        assert_eq!(second.effect, ItemEffect::SawArmed { was_armed: true });
        assert!(state.double_damage_armed);
        assert!(state.player(Seat::One).items.is_empty());
    }

    #[test]
    fn magnifier_peeks_the_chambered_round_without_mutation() {
        let config = GameConfig::default();
        let mut state = started(vec![Round::Blank, Round::Live]);
        give(&mut state, Seat::One, ItemKind::Magnifier);
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Magnifier, None, &mut rng)
            .unwrap();

        assert_eq!(
            outcome.effect,
            ItemEffect::Peek {
                chambered: Some(Round::Live)
            }
        );
        assert_eq!(state.magazine, vec![Round::Blank, Round::Live]);
    }

    #[test]
    fn beer_on_the_last_round_chains_a_reload() {
        let config = GameConfig::default();
        let mut state = started(vec![Round::Live]);
        give(&mut state, Seat::One, ItemKind::Beer);
        let mut rng = StdRng::seed_from_u64(4);

        let outcome = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Beer, None, &mut rng)
            .unwrap();

        assert_eq!(
            outcome.effect,
            ItemEffect::Eject {
                ejected: Some(Round::Live)
            }
        );
        let reload = outcome.reload.unwrap();
        assert!((3..=8).contains(&reload.magazine_len));
        assert_eq!(reload.round_number, 1);
        // Both players received the same grant count.
        assert_eq!(state.player(Seat::Two).items.len(), reload.items_granted as usize);
    }

    #[test]
    fn cigarette_heals_one_capped_at_max() {
        let config = GameConfig::default();
        let mut state = started(vec![Round::Live]);
        state.player_mut(Seat::One).hp = 5;
        give(&mut state, Seat::One, ItemKind::Cigarette);
        give(&mut state, Seat::One, ItemKind::Cigarette);
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Cigarette, None, &mut rng)
            .unwrap();
        assert_eq!(outcome.effect, ItemEffect::Smoke { healed: 1 });
        assert_eq!(state.player(Seat::One).hp, 6);

        let outcome = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Cigarette, None, &mut rng)
            .unwrap();
        assert_eq!(outcome.effect, ItemEffect::Smoke { healed: 0 });
        assert_eq!(state.player(Seat::One).hp, 6);
    }

    #[test]
    fn second_handcuff_in_the_same_turn_is_blocked() {
        let config = GameConfig::default();
        let mut state = started(vec![Round::Live]);
        give(&mut state, Seat::One, ItemKind::Handcuffs);
        give(&mut state, Seat::One, ItemKind::Handcuffs);
        let mut rng = StdRng::seed_from_u64(6);

        let outcome = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Handcuffs, None, &mut rng)
            .unwrap();
        assert_eq!(outcome.effect, ItemEffect::Cuff { applied: true });
        assert!(state.player(Seat::Two).handcuffed);

        let outcome = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Handcuffs, None, &mut rng)
            .unwrap();
        assert_eq!(outcome.effect, ItemEffect::Cuff { applied: false });
        assert!(state.player(Seat::Two).handcuffed);
    }

    #[test]
    fn expired_medicine_can_be_fatal() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(unlucky_seed());

        let mut state = started(vec![Round::Live]);
        state.player_mut(Seat::One).hp = 1;
        give(&mut state, Seat::One, ItemKind::ExpiredMedicine);

        let outcome = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::ExpiredMedicine, None, &mut rng)
            .unwrap();

        assert_eq!(outcome.effect, ItemEffect::Medicine { healed: None });
        assert_eq!(
            outcome.game_over,
            Some(GameOver {
                winner: Seat::Two,
                loser: Seat::One
            })
        );
        assert_eq!(state.player(Seat::One).hp, 0);
    }

    #[test]
    fn inverter_flips_the_chambered_round_in_place() {
        let config = GameConfig::default();
        let mut state = started(vec![Round::Blank, Round::Live]);
        give(&mut state, Seat::One, ItemKind::Inverter);
        let mut rng = StdRng::seed_from_u64(8);

        let outcome = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Inverter, None, &mut rng)
            .unwrap();

        assert_eq!(
            outcome.effect,
            ItemEffect::Invert {
                flipped: Some((Round::Live, Round::Blank))
            }
        );
        assert_eq!(state.magazine, vec![Round::Blank, Round::Blank]);
    }

    #[test]
    fn burner_phone_reveals_without_removing() {
        let config = GameConfig::default();
        let magazine = vec![Round::Live, Round::Blank, Round::Live];
        let mut state = started(magazine.clone());
        give(&mut state, Seat::One, ItemKind::BurnerPhone);
        let mut rng = StdRng::seed_from_u64(9);

        let outcome = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::BurnerPhone, None, &mut rng)
            .unwrap();

        let ItemEffect::PhoneCall { hint: Some((index, round)) } = outcome.effect else {
            panic!("expected a hint");
        };
        assert!(index < magazine.len());
        assert_eq!(round, magazine[index]);
        assert_eq!(state.magazine, magazine);
    }

    #[test]
    fn adrenaline_validates_before_consuming_anything() {
        let config = GameConfig::default();
        let mut state = started(vec![Round::Live]);
        give(&mut state, Seat::One, ItemKind::Adrenaline);
        give(&mut state, Seat::Two, ItemKind::Adrenaline);
        let before = state.clone();
        let mut rng = StdRng::seed_from_u64(10);

        // Picking the opponent's adrenaline is rejected.
        let err = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Adrenaline, Some(ItemKind::Adrenaline), &mut rng)
            .unwrap_err();
        assert_eq!(err, ItemError::InvalidSelfTarget);
        assert_eq!(state, before);

        // Picking an item the opponent does not hold is rejected.
        let err = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Adrenaline, Some(ItemKind::Beer), &mut rng)
            .unwrap_err();
        assert_eq!(err, ItemError::NotHeldByOpponent { item: ItemKind::Beer });
        assert_eq!(state, before);
    }

    #[test]
    fn adrenaline_forces_the_opponent_item_in_their_context() {
        let config = GameConfig::default();
        let mut state = started(vec![Round::Live]);
        state.player_mut(Seat::Two).hp = 4;
        give(&mut state, Seat::One, ItemKind::Adrenaline);
        give(&mut state, Seat::Two, ItemKind::Cigarette);
        let mut rng = StdRng::seed_from_u64(11);

        let outcome = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Adrenaline, Some(ItemKind::Cigarette), &mut rng)
            .unwrap();

        let ItemEffect::Adrenaline { picked, forced } = outcome.effect else {
            panic!("expected a delegated use");
        };
        assert_eq!(picked, ItemKind::Cigarette);
        assert_eq!(forced.actor, Seat::Two);
        assert_eq!(forced.effect, ItemEffect::Smoke { healed: 1 });
        // The heal landed on the opponent, both items were consumed.
        assert_eq!(state.player(Seat::Two).hp, 5);
        assert!(state.player(Seat::One).items.is_empty());
        assert!(state.player(Seat::Two).items.is_empty());
    }

    #[test]
    fn forced_handcuffs_cuff_the_original_actor() {
        let config = GameConfig::default();
        let mut state = started(vec![Round::Live]);
        give(&mut state, Seat::One, ItemKind::Adrenaline);
        give(&mut state, Seat::Two, ItemKind::Handcuffs);
        let mut rng = StdRng::seed_from_u64(12);

        GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Adrenaline, Some(ItemKind::Handcuffs), &mut rng)
            .unwrap();

        // The effect ran as the opponent, so the cuff lands on seat one.
        assert!(state.player(Seat::One).handcuffed);
        assert!(state.handcuff_used_this_turn);
    }

    #[test]
    fn forced_beer_on_the_last_round_carries_the_reload_in_the_delegation() {
        let config = GameConfig::default();
        let mut state = started(vec![Round::Live]);
        give(&mut state, Seat::One, ItemKind::Adrenaline);
        give(&mut state, Seat::Two, ItemKind::Beer);
        let mut rng = StdRng::seed_from_u64(13);

        let outcome = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Adrenaline, Some(ItemKind::Beer), &mut rng)
            .unwrap();

        // The chained signals live on the forced use, not the outer one.
        assert!(outcome.reload.is_none());
        assert!(outcome.game_over.is_none());
        let ItemEffect::Adrenaline { forced, .. } = outcome.effect else {
            panic!("expected a delegated use");
        };
        assert_eq!(
            forced.effect,
            ItemEffect::Eject {
                ejected: Some(Round::Live)
            }
        );
        let reload = forced.reload.unwrap();
        assert_eq!(reload.round_number, 1);
        assert!((3..=8).contains(&reload.magazine_len));
    }

    #[test]
    fn forced_fatal_medicine_carries_game_over_in_the_delegation() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(unlucky_seed());

        let mut state = started(vec![Round::Live]);
        state.player_mut(Seat::Two).hp = 1;
        give(&mut state, Seat::One, ItemKind::Adrenaline);
        give(&mut state, Seat::Two, ItemKind::ExpiredMedicine);

        let outcome = GameEngine::new(&mut state, &config)
            .use_item(ItemKind::Adrenaline, Some(ItemKind::ExpiredMedicine), &mut rng)
            .unwrap();

        assert!(outcome.game_over.is_none());
        let ItemEffect::Adrenaline { forced, .. } = outcome.effect else {
            panic!("expected a delegated use");
        };
        assert_eq!(forced.effect, ItemEffect::Medicine { healed: None });
        assert_eq!(
            forced.game_over,
            Some(GameOver {
                winner: Seat::One,
                loser: Seat::Two
            })
        );
        assert_eq!(state.player(Seat::Two).hp, 0);
    }
}
