use crate::item::ItemKind;

/// Validation failures for item use. All are recoverable: the engine
/// guarantees no state was mutated when one of these is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("you do not hold a {item}")]
    NotOwned { item: ItemKind },

    #[error("your opponent does not hold a {item}")]
    NotHeldByOpponent { item: ItemKind },

    #[error("adrenaline cannot target the opponent's adrenaline")]
    InvalidSelfTarget,

    #[error("{item} requires a target item")]
    TargetRequired { item: ItemKind },
}
