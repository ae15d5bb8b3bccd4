use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod game;
mod generator;
mod session;
mod tile;
mod types;

/// Board dimensions, the mine count follows from them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
}

impl BoardConfig {
    pub const DEFAULT_SIZE: Coord2 = (9, 9);

    /// One mine per eight tiles, rounded down.
    pub const MINE_DENSITY_DIVISOR: CellCount = 8;

    pub fn new((rows, cols): Coord2) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        Self { size: (rows, cols) }
    }

    pub const fn total_tiles(&self) -> CellCount {
        area(self.size)
    }

    pub const fn mine_count(&self) -> CellCount {
        self.total_tiles() / Self::MINE_DENSITY_DIVISOR
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    Flagged,
    Unflagged,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when revealing several tiles at once
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mine_count_is_an_eighth_rounded_down() {
        assert_eq!(BoardConfig::new((9, 9)).mine_count(), 10);
        assert_eq!(BoardConfig::new((3, 3)).mine_count(), 1);
        assert_eq!(BoardConfig::new((2, 3)).mine_count(), 0);
        assert_eq!(BoardConfig::new((16, 30)).mine_count(), 60);
    }

    #[test]
    fn zero_dimensions_are_clamped() {
        assert_eq!(BoardConfig::new((0, 5)).size, (1, 5));
        assert_eq!(BoardConfig::default().size, (9, 9));
    }

    #[test]
    fn hit_mine_dominates_merge() {
        use RevealOutcome::*;
        assert_eq!(Revealed | HitMine | Won, HitMine);
        assert_eq!(NoChange | Won, Won);
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
