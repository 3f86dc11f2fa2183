/// Game configuration constants and tunable ranges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Inclusive range for the freshly generated magazine length.
    pub magazine_len: (u8, u8),
    /// Inclusive range for the per-player item grant on regeneration.
    pub reload_grant: (u8, u8),
    /// Inclusive range for the base item grant at game start.
    /// The first player to act receives one fewer than the drawn base.
    pub start_grant: (u8, u8),
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum items a player can hold; overflow from grants is discarded.
    pub const MAX_ITEMS: usize = 8;

    // ===== fixed rules =====
    /// Starting and maximum hit points.
    pub const MAX_HP: i8 = 6;
    /// Probability that a generated round is live.
    pub const LIVE_PROBABILITY: f64 = 0.5;

    pub fn new() -> Self {
        Self {
            magazine_len: (3, 8),
            reload_grant: (2, 5),
            start_grant: (3, 6),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
