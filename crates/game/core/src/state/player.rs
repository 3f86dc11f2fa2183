use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::item::ItemKind;

/// Opaque chat-platform user identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the two participants in a started game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub id: PlayerId,
    /// Hit points, clamped to `[0, GameConfig::MAX_HP]`.
    pub hp: i8,
    /// Held items; grants past the capacity are discarded.
    pub items: ArrayVec<ItemKind, { GameConfig::MAX_ITEMS }>,
    /// When set, this player's next turn is skipped exactly once.
    pub handcuffed: bool,
}

impl Player {
    /// Creates a participant at full health with an empty inventory.
    pub fn new(name: impl Into<String>, id: impl Into<PlayerId>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            hp: GameConfig::MAX_HP,
            items: ArrayVec::new(),
            handcuffed: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Adds an item, silently discarding it when the inventory is full.
    pub fn grant(&mut self, item: ItemKind) {
        let _ = self.items.try_push(item);
    }

    pub fn holds(&self, item: ItemKind) -> bool {
        self.items.contains(&item)
    }

    /// Removes one copy of `item`. Returns false if none was held.
    pub fn remove_item(&mut self, item: ItemKind) -> bool {
        match self.items.iter().position(|held| *held == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Heals up to `amount`, capped at max hp. Returns the hp actually gained.
    pub fn heal(&mut self, amount: i8) -> i8 {
        let gained = amount.min(GameConfig::MAX_HP - self.hp);
        self.hp += gained;
        gained
    }
}
