//! The closed item catalog.
//!
//! Every usable item is a variant of [`ItemKind`]; effects are resolved by
//! pattern match in the engine so the catalog stays exhaustive and
//! compiler-checked. Parsing is case-insensitive on the display name, which
//! is also the token players type in chat.

/// One of the nine usable items.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ItemKind {
    /// Doubles the damage of the next shot. Not stackable.
    Saw,
    /// Peeks at the chambered round without disturbing it.
    Magnifier,
    /// Ejects the chambered round, discarding it.
    Beer,
    /// Heals 1 hp, capped at the maximum.
    Cigarette,
    /// Skips the opponent's next turn. Once per turn.
    Handcuffs,
    /// Forces the opponent to immediately use one of their items.
    Adrenaline,
    /// 50% heal 2, 50% lose 1. The loss can be fatal.
    #[strum(serialize = "expired medicine")]
    ExpiredMedicine,
    /// Flips the chambered round: live becomes blank and vice versa.
    Inverter,
    /// Reveals the type of one random round in the magazine.
    #[strum(serialize = "burner phone")]
    BurnerPhone,
}

impl ItemKind {
    /// Every catalog entry, in grant-draw order.
    pub const ALL: [ItemKind; 9] = [
        ItemKind::Saw,
        ItemKind::Magnifier,
        ItemKind::Beer,
        ItemKind::Cigarette,
        ItemKind::Handcuffs,
        ItemKind::Adrenaline,
        ItemKind::ExpiredMedicine,
        ItemKind::Inverter,
        ItemKind::BurnerPhone,
    ];

    /// Short description shown next to the item in the status board.
    pub const fn description(self) -> &'static str {
        match self {
            ItemKind::Saw => "next shot deals double damage, not stackable",
            ItemKind::Magnifier => "peek at the chambered round",
            ItemKind::Beer => "eject the chambered round",
            ItemKind::Cigarette => "recover 1 hp",
            ItemKind::Handcuffs => "skip the opponent's next turn",
            ItemKind::Adrenaline => {
                "pick an opponent item and make them use it at once (adrenaline excluded)"
            }
            ItemKind::ExpiredMedicine => "50% chance +2 hp, 50% chance -1 hp",
            ItemKind::Inverter => "live round <=> blank round",
            ItemKind::BurnerPhone => "learn whether one random round is live (not removed)",
        }
    }
}
