//! Presentation: structured engine outcomes to chat narrative.
//!
//! The core engine reports what happened; this module decides how it
//! reads. Mentions are pre-rendered by the caller via
//! [`crate::transport::Messenger::mention`] and passed in as fragments.

use std::fmt::Write as _;

use roulette_core::{
    FireOutcome, FireTarget, GameConfig, GameState, ItemEffect, ItemKind, ItemUse, Player, Reload,
    Round, StartReport, TurnFlow,
};

use crate::session::{Session, SessionPhase};

pub const BANNER: &str = "══ Demon Roulette ══";

fn tagged(name: &Player) -> String {
    format!("{}({})", name.name, name.id)
}

pub fn created(creator: &Player) -> String {
    format!(
        "{BANNER}\nGame created!\nPlayer 1: {}\nPlayer 2: waiting...\n\n\
         Send \"join\" to take the second seat. The game is cancelled if nobody joins in time.",
        tagged(creator)
    )
}

pub fn joined(creator: &Player, joiner: &Player) -> String {
    format!(
        "{BANNER}\nYou're in!\nPlayer 1: {}\nPlayer 2: {}\n\n\
         Player 1 starts the game by sending \"start\".",
        tagged(creator),
        tagged(joiner)
    )
}

pub fn started(report: &StartReport, game: &GameState, first_mention: &str) -> String {
    format!(
        "{BANNER}\nThe game begins!\n\nPlayer 1: {}\nPlayer 2: {}\n\n\
         {first_mention} goes first.\n\
         First to act gets {} items, second gets {}.\n\n\
         The magazine holds {} rounds: {} live, {} blank.\n\n\
         Send \"status\" to see the board.",
        tagged(game.player(roulette_core::Seat::One)),
        tagged(game.player(roulette_core::Seat::Two)),
        report.first_items,
        report.second_items,
        report.magazine_len,
        report.live,
        report.blank,
    )
}

/// The status board: hp and inventories with descriptions.
pub fn status(game: &GameState) -> String {
    let mut board = format!("{BANNER}\n--health--\n");
    for (label, seat) in [
        ("Player 1", roulette_core::Seat::One),
        ("Player 2", roulette_core::Seat::Two),
    ] {
        let player = game.player(seat);
        let _ = writeln!(
            board,
            "{label}({}): {}/{}",
            player.name,
            player.hp,
            GameConfig::MAX_HP
        );
    }
    for (label, seat) in [
        ("Player 1", roulette_core::Seat::One),
        ("Player 2", roulette_core::Seat::Two),
    ] {
        let player = game.player(seat);
        let _ = writeln!(
            board,
            "\n--{label}'s items ({}/{})--",
            player.items.len(),
            GameConfig::MAX_ITEMS
        );
        for item in &player.items {
            let _ = writeln!(board, "{item} ({})", item.description());
        }
    }
    board.push_str("\nSend an item name to use it; send \"self\" or \"opponent\" to shoot.");
    board
}

/// Narration for one fire call. `next_mention` is the mention fragment of
/// the player who holds the turn after resolution.
pub fn fire(outcome: &FireOutcome, next_mention: &str) -> String {
    let Some(shot) = outcome.shot else {
        return format!("{BANNER}\nThe magazine is already empty. A new round begins.");
    };

    let aim = match outcome.target {
        FireTarget::Myself => "yourself",
        FireTarget::Opponent => "your opponent",
    };
    let mut text = format!(
        "{BANNER}\nYou point the gun at {aim} and pull the trigger... a {} round!",
        shot.round
    );

    if shot.round == Round::Live {
        match outcome.target {
            FireTarget::Myself => {
                let _ = write!(text, "\nYou lose {} hp.", shot.damage);
            }
            FireTarget::Opponent => {
                let _ = write!(text, "\nYour opponent loses {} hp.", shot.damage);
            }
        }
    }

    match outcome.turn {
        Some(TurnFlow::Retained) => text.push_str("\nStill your turn."),
        Some(TurnFlow::Passed) => {
            let _ = write!(text, "\nTurn over: {next_mention} acts next.");
        }
        Some(TurnFlow::OpponentSkipped) => {
            text.push_str("\nYour opponent is handcuffed and sits this one out. Go again.");
        }
        None => {}
    }
    text
}

pub fn reload(reload: &Reload) -> String {
    format!(
        "{BANNER}\nMagazine spent: round {} begins!\n\
         The new magazine holds {} rounds: {} live, {} blank.\n\
         Both players receive {} random items (capacity {}).",
        reload.round_number,
        reload.magazine_len,
        reload.live,
        reload.blank,
        reload.items_granted,
        GameConfig::MAX_ITEMS,
    )
}

pub fn game_over(winner_mention: &str, loser_mention: &str) -> String {
    format!(
        "{BANNER}\n{loser_mention} is down!\n{winner_mention} takes the final victory!\nGame over!"
    )
}

/// Narration for a direct (non-delegated) effect, phrased for its actor.
fn effect(used: &ItemUse) -> String {
    match &used.effect {
        ItemEffect::SawArmed { was_armed: false } => {
            "The saw bites: the next shot deals double damage.".to_owned()
        }
        ItemEffect::SawArmed { was_armed: true } => {
            "The saw is already in play; nothing more happens.".to_owned()
        }
        ItemEffect::Peek { chambered: Some(round) } => {
            format!("Through the magnifier, the chambered round is... {round}.")
        }
        ItemEffect::Peek { chambered: None } => "The chamber is empty.".to_owned(),
        ItemEffect::Eject { ejected: Some(round) } => {
            format!("A swig of beer, and a {round} round clatters out of the chamber.")
        }
        ItemEffect::Eject { ejected: None } => {
            "The chamber is empty; nothing to eject.".to_owned()
        }
        ItemEffect::Smoke { healed: 0 } => {
            "Already at full health; the cigarette is just a cigarette.".to_owned()
        }
        ItemEffect::Smoke { .. } => "A cigarette: 1 hp recovered.".to_owned(),
        ItemEffect::Cuff { applied: true } => {
            "Handcuffs on: the opponent's next turn is skipped.".to_owned()
        }
        ItemEffect::Cuff { applied: false } => {
            "Handcuffs were already used this turn; nothing happens.".to_owned()
        }
        ItemEffect::Medicine { healed: Some(gained) } => {
            format!("The expired medicine works out: {gained} hp recovered.")
        }
        ItemEffect::Medicine { healed: None } if used.game_over.is_some() => {
            "The expired medicine was a terrible idea. The taker collapses...".to_owned()
        }
        ItemEffect::Medicine { healed: None } => {
            "The expired medicine disagrees: 1 hp lost.".to_owned()
        }
        ItemEffect::Invert { flipped: Some((from, to)) } => {
            format!("The inverter hums: the chambered {from} round is now {to}.")
        }
        ItemEffect::Invert { flipped: None } => "The chamber is empty.".to_owned(),
        ItemEffect::PhoneCall { hint: Some((index, round)) } => {
            format!(
                "A voice on the burner phone whispers: round {} is {round}.",
                index + 1
            )
        }
        ItemEffect::PhoneCall { hint: None } => {
            "The chamber is empty; even the phone has nothing to say.".to_owned()
        }
        ItemEffect::Adrenaline { picked, forced } => format!(
            "You shoot up adrenaline: your opponent is forced to use their {picked} at once:\n{}",
            effect(forced)
        ),
    }
}

pub fn item_use(used: &ItemUse) -> String {
    format!("{BANNER}\n{}", effect(used))
}

pub fn adrenaline_prompt(timeout_secs: u64) -> String {
    format!(
        "{BANNER}\nYou used adrenaline. Within {timeout_secs} seconds, name one of your \
         opponent's items to force them to use it (adrenaline itself excluded):"
    )
}

pub fn adrenaline_unknown_item(text: &str) -> String {
    format!("Your opponent holds no \"{text}\", use cancelled.")
}

pub fn adrenaline_empty_reply() -> String {
    "No item named, use cancelled.".to_owned()
}

pub fn join_timeout(creator_mention: &str) -> String {
    format!("{creator_mention} No second player joined in time, the game is cancelled.")
}

pub fn ended(by_mention: &str) -> String {
    format!("{BANNER}\n{by_mention} force-ended the game in this chat.")
}

/// Status text for a session that exists but has not started.
pub fn pending_status(session: &Session) -> String {
    match &session.phase {
        SessionPhase::Waiting { creator } => format!(
            "{BANNER}\nPlayer 1: {}\nPlayer 2: waiting for someone to join.",
            tagged(creator)
        ),
        SessionPhase::Full { creator, joiner } => format!(
            "{BANNER}\nPlayer 1: {}\nPlayer 2: {}\nWaiting for player 1 to start.",
            tagged(creator),
            tagged(joiner)
        ),
        SessionPhase::Started { game } => status(game),
    }
}

#[cfg(test)]
mod tests {
    use roulette_core::{GameOver, Seat, Shot};

    use super::*;

    fn game() -> GameState {
        GameState::new(
            [Player::new("alice", "a"), Player::new("bob", "b")],
            Seat::One,
            vec![Round::Live, Round::Blank],
        )
    }

    #[test]
    fn status_board_lists_both_players() {
        let mut game = game();
        game.player_mut(Seat::One).grant(ItemKind::Saw);
        let board = status(&game);
        assert!(board.contains("Player 1(alice): 6/6"));
        assert!(board.contains("Player 2(bob): 6/6"));
        assert!(board.contains("saw (next shot deals double damage"));
        assert!(board.contains("(1/8)"));
        assert!(board.contains("(0/8)"));
    }

    #[test]
    fn fire_narration_covers_the_empty_magazine_noop() {
        let outcome = FireOutcome {
            target: FireTarget::Opponent,
            shot: None,
            turn: None,
            reload: None,
            game_over: None,
        };
        assert!(fire(&outcome, "@bob").contains("already empty"));
    }

    #[test]
    fn fire_narration_reports_damage_and_turn_switch() {
        let outcome = FireOutcome {
            target: FireTarget::Opponent,
            shot: Some(Shot {
                round: Round::Live,
                damage: 2,
            }),
            turn: Some(TurnFlow::Passed),
            reload: None,
            game_over: None,
        };
        let text = fire(&outcome, "@bob");
        assert!(text.contains("a live round!"));
        assert!(text.contains("loses 2 hp"));
        assert!(text.contains("@bob acts next"));
    }

    #[test]
    fn forced_adrenaline_use_nests_the_delegated_narration() {
        let used = ItemUse {
            item: ItemKind::Adrenaline,
            actor: Seat::One,
            effect: ItemEffect::Adrenaline {
                picked: ItemKind::Cigarette,
                forced: Box::new(ItemUse {
                    item: ItemKind::Cigarette,
                    actor: Seat::Two,
                    effect: ItemEffect::Smoke { healed: 1 },
                    reload: None,
                    game_over: None,
                }),
            },
            reload: None,
            game_over: None,
        };
        let text = item_use(&used);
        assert!(text.contains("forced to use their cigarette"));
        assert!(text.contains("1 hp recovered"));
    }

    #[test]
    fn fatal_medicine_reads_as_a_collapse() {
        let used = ItemUse {
            item: ItemKind::ExpiredMedicine,
            actor: Seat::One,
            effect: ItemEffect::Medicine { healed: None },
            reload: None,
            game_over: Some(GameOver {
                winner: Seat::Two,
                loser: Seat::One,
            }),
        };
        assert!(item_use(&used).contains("collapses"));
    }
}
