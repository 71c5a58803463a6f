//! Tile types and their capabilities.
//!
//! `GemType` is a closed enum; each variant has a statically known
//! capability set:
//!
//! | Type        | Movable | Matchable | Spawns | IsSpawned | IsBlocking |
//! |-------------|---------|-----------|--------|-----------|------------|
//! | Empty       | yes     |           |        |           |            |
//! | colors      | yes     | yes       |        |           |            |
//! | Super/Choco | yes     | yes       |        |           |            |
//! | Blocked     |         |           |        |           | yes        |
//! | Spawner     |         |           | yes    |           |            |
//! | Spawnee     |         |           |        | yes       |            |

use serde::{Deserialize, Serialize};

/// Tile type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GemType {
    Empty,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
    Blocked,
    Super,
    Choco,
    Spawner,
    Spawnee,
}

impl GemType {
    /// Every colored variant, in declaration order.
    pub const COLORS: [GemType; 6] = [
        GemType::Red,
        GemType::Green,
        GemType::Blue,
        GemType::Yellow,
        GemType::Purple,
        GemType::Orange,
    ];

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, GemType::Empty)
    }

    /// Plain colored tile, eligible as a matching type.
    #[must_use]
    pub const fn is_colored(self) -> bool {
        matches!(
            self,
            GemType::Red
                | GemType::Green
                | GemType::Blue
                | GemType::Yellow
                | GemType::Purple
                | GemType::Orange
        )
    }

    /// Can be swapped and can fall. Empty counts: it is what rises when a
    /// tile falls into its cell.
    #[must_use]
    pub const fn is_movable(self) -> bool {
        matches!(self, GemType::Empty | GemType::Super | GemType::Choco) || self.is_colored()
    }

    /// Can take part in a match.
    #[must_use]
    pub const fn is_matchable(self) -> bool {
        self.is_movable() && !self.is_empty()
    }

    #[must_use]
    pub const fn spawns(self) -> bool {
        matches!(self, GemType::Spawner)
    }

    #[must_use]
    pub const fn is_spawned(self) -> bool {
        matches!(self, GemType::Spawnee)
    }

    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, GemType::Blocked)
    }

    /// One-character symbol used by the text layout format.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            GemType::Empty => '.',
            GemType::Red => 'R',
            GemType::Green => 'G',
            GemType::Blue => 'B',
            GemType::Yellow => 'Y',
            GemType::Purple => 'P',
            GemType::Orange => 'O',
            GemType::Blocked => '#',
            GemType::Super => '*',
            GemType::Choco => '@',
            GemType::Spawner => 'S',
            GemType::Spawnee => 's',
        }
    }

    /// Inverse of [`GemType::symbol`].
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        let gem_type = match symbol {
            '.' => GemType::Empty,
            'R' => GemType::Red,
            'G' => GemType::Green,
            'B' => GemType::Blue,
            'Y' => GemType::Yellow,
            'P' => GemType::Purple,
            'O' => GemType::Orange,
            '#' => GemType::Blocked,
            '*' => GemType::Super,
            '@' => GemType::Choco,
            'S' => GemType::Spawner,
            's' => GemType::Spawnee,
            _ => return None,
        };
        Some(gem_type)
    }
}

/// Special behaviour a promoted tile carries.
///
/// `Super` and `Square` are resolved into their own tile types on promotion;
/// the directional keys stay on the tile as its `special_key`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialKey {
    Super,
    Square,
    Horizontal,
    Vertical,
    Cross,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities() {
        assert!(GemType::Empty.is_movable());
        assert!(!GemType::Empty.is_matchable());

        for color in GemType::COLORS {
            assert!(color.is_movable());
            assert!(color.is_matchable());
            assert!(color.is_colored());
        }

        assert!(GemType::Super.is_matchable());
        assert!(GemType::Choco.is_matchable());
        assert!(!GemType::Super.is_colored());

        assert!(!GemType::Blocked.is_movable());
        assert!(GemType::Blocked.is_blocking());
        assert!(!GemType::Spawner.is_movable());
        assert!(GemType::Spawner.spawns());
        assert!(!GemType::Spawnee.is_matchable());
        assert!(GemType::Spawnee.is_spawned());
    }

    #[test]
    fn test_symbols_round_trip() {
        let all = [
            GemType::Empty,
            GemType::Red,
            GemType::Green,
            GemType::Blue,
            GemType::Yellow,
            GemType::Purple,
            GemType::Orange,
            GemType::Blocked,
            GemType::Super,
            GemType::Choco,
            GemType::Spawner,
            GemType::Spawnee,
        ];

        for gem_type in all {
            assert_eq!(GemType::from_symbol(gem_type.symbol()), Some(gem_type));
        }
        assert_eq!(GemType::from_symbol('x'), None);
    }
}
