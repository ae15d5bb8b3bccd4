use serde::{Deserialize, Serialize};

use crate::Coord2;

/// One square of the board.
///
/// Mutation goes through [`Board`](crate::Board) so the flag count and the
/// reveal rules stay in step with the tile state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    position: Coord2,
    mined: bool,
    flagged: bool,
    revealed: bool,
}

impl Tile {
    pub const fn new(position: Coord2) -> Self {
        Self {
            position,
            mined: false,
            flagged: false,
            revealed: false,
        }
    }

    pub const fn position(&self) -> Coord2 {
        self.position
    }

    pub const fn is_mined(&self) -> bool {
        self.mined
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Neither revealed nor flagged, still unaccounted for.
    pub const fn is_unresolved(&self) -> bool {
        !self.revealed && !self.flagged
    }

    pub(crate) fn set_mine(&mut self) {
        self.mined = true;
    }

    pub(crate) fn mark_revealed(&mut self) {
        debug_assert!(!self.flagged);
        self.revealed = true;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        debug_assert!(!self.revealed);
        self.flagged = flagged;
    }

    /// Checks the per-tile invariants of a restored tile.
    pub(crate) const fn is_consistent_at(&self, position: Coord2) -> bool {
        self.position.0 == position.0
            && self.position.1 == position.1
            && !(self.flagged && self.revealed)
    }
}

/// Player-visible marker for one tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileMarker {
    Hidden,
    Flagged,
    Mine,
    Count(u8),
}

impl TileMarker {
    pub const fn symbol(self) -> &'static str {
        use TileMarker::*;
        match self {
            Hidden => "[]",
            Flagged => "FL",
            Mine => "*",
            Count(0) => "__",
            Count(1) => "1",
            Count(2) => "2",
            Count(3) => "3",
            Count(4) => "4",
            Count(5) => "5",
            Count(6) => "6",
            Count(7) => "7",
            Count(_) => "8",
        }
    }
}

impl core::fmt::Display for TileMarker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tile_is_unresolved() {
        let tile = Tile::new((2, 3));
        assert_eq!(tile.position(), (2, 3));
        assert!(tile.is_unresolved());
        assert!(!tile.is_mined());
    }

    #[test]
    fn flagged_and_revealed_is_inconsistent() {
        let tile = Tile {
            position: (0, 0),
            mined: false,
            flagged: true,
            revealed: true,
        };
        assert!(!tile.is_consistent_at((0, 0)));
        assert!(!Tile::new((0, 1)).is_consistent_at((0, 0)));
        assert!(Tile::new((0, 0)).is_consistent_at((0, 0)));
    }

    #[test]
    fn marker_symbols() {
        assert_eq!(TileMarker::Hidden.to_string(), "[]");
        assert_eq!(TileMarker::Flagged.to_string(), "FL");
        assert_eq!(TileMarker::Mine.to_string(), "*");
        assert_eq!(TileMarker::Count(0).to_string(), "__");
        assert_eq!(TileMarker::Count(3).to_string(), "3");
    }

    #[test]
    fn marker_honours_width() {
        assert_eq!(format!("{:>2}", TileMarker::Count(1)), " 1");
        assert_eq!(format!("{:>2}", TileMarker::Mine), " *");
        assert_eq!(format!("{:>2}", TileMarker::Flagged), "FL");
    }
}
