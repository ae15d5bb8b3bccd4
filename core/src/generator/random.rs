use std::collections::BTreeSet;

use super::*;

/// Uniform placement by rejection sampling: draw any position, keep it only if it is new.
///
/// The density rule keeps boards at one mine per eight tiles, so retries stay rare.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinePlacer {
    seed: u64,
}

impl RandomMinePlacer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place(self, config: BoardConfig) -> Vec<Coord2> {
        use rand::prelude::*;

        let (rows, cols) = config.size;
        let wanted = usize::from(config.mine_count().min(config.total_tiles()));

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut seen = BTreeSet::new();
        let mut mines = Vec::with_capacity(wanted);
        let mut draws = 0usize;

        while mines.len() < wanted {
            let pos = (rng.random_range(0..rows), rng.random_range(0..cols));
            draws += 1;
            if seen.insert(pos) {
                mines.push(pos);
            }
        }

        log::debug!(
            "Placed {} mines on {:?} with {} draws (seed {})",
            mines.len(),
            config.size,
            draws,
            self.seed
        );
        mines
    }
}
