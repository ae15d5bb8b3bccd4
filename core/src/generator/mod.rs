use crate::*;
pub use random::*;

mod random;

/// Chooses which positions of a board hold mines.
pub trait MinePlacer {
    /// Returns exactly `config.mine_count()` distinct in-bounds positions.
    fn place(self, config: BoardConfig) -> Vec<Coord2>;
}
