use alloc::vec::Vec;

use super::*;

/// Rejection-sampling generator: draws uniformly random cells and keeps the ones that are free.
///
/// When the board is close to saturated the sampler can keep hitting occupied cells, so after
/// `max_attempts` draws it switches to picking among the remaining eligible cells directly.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    max_attempts: u32,
}

impl RandomBoardGenerator {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..self
        }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: BoardConfig, safe: &[Coord2]) -> Board {
        use rand::prelude::*;

        let size = config.size;
        let is_eligible = |coords: Coord2| !is_corner(coords, size) && !safe.contains(&coords);

        let eligible_cells = (0..size.0)
            .flat_map(|x| (0..size.1).map(move |y| (x, y)))
            .filter(|&coords| is_eligible(coords))
            .count() as CellCount;

        let mut target = config.mines;
        if target > eligible_cells {
            log::warn!(
                "Board cannot hold all mines, requested {} but only {} cells are eligible",
                target,
                eligible_cells
            );
            target = eligible_cells;
        }

        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;
        let mut attempts: u32 = 0;

        while placed < target && attempts < self.max_attempts {
            attempts += 1;
            let coords = (rng.gen_range(0..size.0), rng.gen_range(0..size.1));
            if is_eligible(coords) && !mines[coords.to_nd_index()] {
                mines[coords.to_nd_index()] = true;
                placed += 1;
            }
        }

        if placed < target {
            log::warn!(
                "Rejection sampling gave up after {} draws with {} of {} mines placed, placing the rest exhaustively",
                attempts,
                placed,
                target
            );
            let mut free: Vec<Coord2> = (0..size.0)
                .flat_map(|x| (0..size.1).map(move |y| (x, y)))
                .filter(|&coords| is_eligible(coords) && !mines[coords.to_nd_index()])
                .collect();
            while placed < target && !free.is_empty() {
                let coords = free.swap_remove(rng.gen_range(0..free.len()));
                mines[coords.to_nd_index()] = true;
                placed += 1;
            }
        }

        Board::from_generated(mines, size, placed)
    }
}
