use std::collections::VecDeque;
use std::io;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The grid of tiles plus the running mine and flag totals.
///
/// `flag_count` is kept in step by [`Board::toggle_flag`] and never recomputed,
/// restoring a board from its serialized form checks it against the tiles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardState")]
pub struct Board {
    tiles: Array2<Tile>,
    mine_count: CellCount,
    flag_count: CellCount,
}

#[derive(Deserialize)]
struct BoardState {
    tiles: Array2<Tile>,
    mine_count: CellCount,
    flag_count: CellCount,
}

impl TryFrom<BoardState> for Board {
    type Error = GameError;

    fn try_from(state: BoardState) -> Result<Self> {
        let board = Self {
            tiles: state.tiles,
            mine_count: state.mine_count,
            flag_count: state.flag_count,
        };
        board.validate()?;
        Ok(board)
    }
}

impl Board {
    pub const AUTO_REVEAL_PROMPT: &'static str = "Would you like to reveal the remaining tiles? (y/n)";
    pub const AUTO_FLAG_PROMPT: &'static str = "Would you like to flag the remaining tiles? (y/n)";

    pub fn new(config: BoardConfig, placer: impl MinePlacer) -> Result<Self> {
        let mines = placer.place(config);
        Self::with_mines(config.size, &mines)
    }

    pub fn random(size: Coord2, seed: u64) -> Result<Self> {
        Self::new(BoardConfig::new(size), RandomMinePlacer::new(seed))
    }

    /// Builds a board with an explicit mine layout, which must still follow the density rule.
    pub fn with_mines(size: Coord2, mines: &[Coord2]) -> Result<Self> {
        let config = BoardConfig::new(size);
        let mut board = Self {
            tiles: Array2::from_shape_fn(config.size.grid_index(), |(row, col)| {
                Tile::new((row as Coord, col as Coord))
            }),
            mine_count: config.mine_count(),
            flag_count: 0,
        };

        for &coords in mines {
            let coords = board.validate_coords(coords)?;
            board.tiles[coords.grid_index()].set_mine();
        }

        let actual = board.count_tiles(Tile::is_mined);
        if actual != board.mine_count {
            return Err(GameError::MineCountMismatch {
                expected: board.mine_count,
                actual,
            });
        }

        log::debug!(
            "New board {:?} with {} mines",
            board.size(),
            board.mine_count
        );
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.tiles.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_tiles(Tile::is_revealed)
    }

    pub fn is_legal_position(&self, coords: Coord2) -> bool {
        let (rows, cols) = self.size();
        coords.0 < rows && coords.1 < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_legal_position(coords) {
            Ok(coords)
        } else {
            Err(GameError::IllegalPosition(coords))
        }
    }

    /// Panics when `coords` is off the board, see [`Board::validate_coords`].
    pub fn tile(&self, coords: Coord2) -> &Tile {
        &self.tiles[coords.grid_index()]
    }

    /// Every tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn neighbours(&self, coords: Coord2) -> impl Iterator<Item = &Tile> {
        NeighborIter::new(coords, self.size()).map(move |pos| &self.tiles[pos.grid_index()])
    }

    pub fn neighbor_mine_count(&self, coords: Coord2) -> u8 {
        self.neighbours(coords)
            .filter(|tile| tile.is_mined())
            .count()
            .try_into()
            .unwrap_or(u8::MAX)
    }

    /// Tiles that are neither revealed nor flagged.
    pub fn unresolved_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|tile| tile.is_unresolved())
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.tile(coords).is_flagged() {
            return Err(GameError::RevealOnFlagged);
        }
        Ok(self.open(coords))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.tile(coords).is_revealed() {
            return Err(GameError::FlagOnRevealed);
        }
        Ok(self.flip_flag(coords))
    }

    pub fn lost(&self) -> bool {
        self.tiles
            .iter()
            .any(|tile| tile.is_revealed() && tile.is_mined())
    }

    /// Needs exactly as many flags as mines *and* every tile revealed or flagged.
    ///
    /// Revealing every safe tile without flagging the mines is therefore not a win.
    pub fn won(&self) -> bool {
        self.flag_count == self.mine_count && self.tiles.iter().all(|tile| !tile.is_unresolved())
    }

    pub fn is_over(&self) -> bool {
        self.lost() || self.won()
    }

    /// All flags are placed, so every unresolved tile is presumed safe.
    pub fn can_auto_reveal(&self) -> bool {
        self.flag_count == self.mine_count && self.unresolved_tiles().next().is_some()
    }

    /// The unresolved tiles are exactly as many as the mines left unflagged.
    pub fn can_auto_flag(&self) -> bool {
        let unflagged_mines = i32::from(self.mine_count) - i32::from(self.flag_count);
        unflagged_mines != 0 && self.count_tiles(Tile::is_unresolved) as i32 == unflagged_mines
    }

    pub fn auto_reveal(&mut self) -> RevealOutcome {
        let targets: Vec<_> = self.unresolved_tiles().map(Tile::position).collect();
        log::debug!("Auto-revealing {} tiles", targets.len());
        targets
            .into_iter()
            .map(|coords| self.open(coords))
            .fold(RevealOutcome::NoChange, |acc, outcome| acc | outcome)
    }

    /// Returns how many tiles were flagged.
    pub fn auto_flag(&mut self) -> CellCount {
        let targets: Vec<_> = self.unresolved_tiles().map(Tile::position).collect();
        log::debug!("Auto-flagging {} tiles", targets.len());
        for &coords in &targets {
            self.flip_flag(coords);
        }
        targets.len() as CellCount
    }

    /// Offers auto-reveal then auto-flag, applying each one the player confirms.
    ///
    /// Returns whether the board changed.
    pub fn auto_complete<C: Confirm + ?Sized>(&mut self, confirm: &mut C) -> io::Result<bool> {
        let mut changed = false;

        if !self.is_over() && self.can_auto_reveal() && confirm.confirm(Self::AUTO_REVEAL_PROMPT)? {
            changed |= self.auto_reveal().has_update();
        }

        if !self.is_over() && self.can_auto_flag() && confirm.confirm(Self::AUTO_FLAG_PROMPT)? {
            changed |= self.auto_flag() > 0;
        }

        Ok(changed)
    }

    pub fn marker_at(&self, coords: Coord2) -> TileMarker {
        let tile = self.tile(coords);
        match (tile.is_revealed(), tile.is_flagged(), tile.is_mined()) {
            (true, _, true) => TileMarker::Mine,
            (true, _, false) => TileMarker::Count(self.neighbor_mine_count(coords)),
            (false, true, _) => TileMarker::Flagged,
            (false, false, _) => TileMarker::Hidden,
        }
    }

    pub fn view(&self) -> BoardView {
        BoardView {
            mine_count: self.mine_count,
            flag_count: self.flag_count,
            markers: self.tiles.map(|tile| self.marker_at(tile.position())),
        }
    }

    /// Reveals an unflagged tile, flood-filling from it when it touches no mines.
    ///
    /// An already revealed tile with no mined neighbours floods again, which opens
    /// neighbours that a since removed flag held back.
    fn open(&mut self, coords: Coord2) -> RevealOutcome {
        let tile = *self.tile(coords);
        if tile.is_flagged() {
            return RevealOutcome::NoChange;
        }

        let opened = if !tile.is_revealed() {
            if tile.is_mined() {
                self.tiles[coords.grid_index()].mark_revealed();
                log::debug!("Revealed mine at {:?}", coords);
                return RevealOutcome::HitMine;
            }
            self.flood_reveal([coords])
        } else if !tile.is_mined() && self.neighbor_mine_count(coords) == 0 {
            let hidden: Vec<_> = self.hidden_neighbours(coords).collect();
            self.flood_reveal(hidden)
        } else {
            0
        };

        if opened == 0 {
            return RevealOutcome::NoChange;
        }
        log::debug!("Revealed {} tiles starting at {:?}", opened, coords);

        if self.won() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn hidden_neighbours(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        NeighborIter::new(coords, self.size()).filter(|&pos| !self.tile(pos).is_revealed())
    }

    fn flood_reveal(&mut self, seeds: impl IntoIterator<Item = Coord2>) -> CellCount {
        let mut opened = 0;
        let mut to_visit: VecDeque<Coord2> = seeds.into_iter().collect();

        while let Some(visit_coords) = to_visit.pop_front() {
            let tile = *self.tile(visit_coords);

            if tile.is_flagged() {
                log::debug!("Flood fill held back by flag at {:?}", visit_coords);
                continue;
            }
            // revealed tiles are never expanded twice, mined tiles stop the fill
            if tile.is_revealed() || tile.is_mined() {
                log::trace!("Skipping tile at {:?}", visit_coords);
                continue;
            }

            self.tiles[visit_coords.grid_index()].mark_revealed();
            opened += 1;

            let count = self.neighbor_mine_count(visit_coords);
            log::trace!(
                "Flood revealed tile at {:?}, mine count: {}",
                visit_coords,
                count
            );

            if count == 0 {
                let hidden: Vec<_> = self.hidden_neighbours(visit_coords).collect();
                to_visit.extend(hidden);
            }
        }

        opened
    }

    fn flip_flag(&mut self, coords: Coord2) -> MarkOutcome {
        let tile = &mut self.tiles[coords.grid_index()];
        if tile.is_flagged() {
            tile.set_flagged(false);
            self.flag_count -= 1;
            MarkOutcome::Unflagged
        } else {
            tile.set_flagged(true);
            self.flag_count += 1;
            MarkOutcome::Flagged
        }
    }

    fn count_tiles(&self, pred: impl Fn(&Tile) -> bool) -> CellCount {
        self.tiles.iter().filter(|&tile| pred(tile)).count() as CellCount
    }

    fn validate(&self) -> Result<()> {
        let (rows, cols) = self.tiles.dim();
        let max = usize::from(Coord::MAX);
        if rows == 0 || cols == 0 || rows > max || cols > max {
            return Err(GameError::InvalidBoardShape);
        }

        for ((row, col), tile) in self.tiles.indexed_iter() {
            let coords = (row as Coord, col as Coord);
            if !tile.is_consistent_at(coords) {
                return Err(GameError::InconsistentTile(coords));
            }
        }

        let expected = BoardConfig::new(self.size()).mine_count();
        if self.mine_count != expected {
            return Err(GameError::MineCountMismatch {
                expected,
                actual: self.mine_count,
            });
        }
        let mined = self.count_tiles(Tile::is_mined);
        if mined != expected {
            return Err(GameError::MineCountMismatch {
                expected,
                actual: mined,
            });
        }

        let flagged = self.count_tiles(Tile::is_flagged);
        if flagged != self.flag_count {
            return Err(GameError::FlagCountMismatch {
                expected: flagged,
                actual: self.flag_count,
            });
        }

        Ok(())
    }
}

/// Read-only projection of a board for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub mine_count: CellCount,
    pub flag_count: CellCount,
    pub markers: Array2<TileMarker>,
}

impl BoardView {
    pub fn marker_at(&self, coords: Coord2) -> TileMarker {
        self.markers[coords.grid_index()]
    }
}

impl core::fmt::Display for BoardView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "There are {} mines", self.mine_count)?;
        writeln!(f, "There are {} flags", self.flag_count)?;
        for row in self.markers.rows() {
            let line: Vec<String> = row.iter().map(|marker| format!("{:>2}", marker)).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
