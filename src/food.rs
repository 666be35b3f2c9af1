use crate::chain::SnakeChain;
use crate::grid::{Grid, Point};
use log::debug;
use rand::Rng;
use rand::seq::IteratorRandom;

/// Rejected samples allowed per board cell before enumerating the free cells.
const SAMPLES_PER_CELL: usize = 4;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Food {
    pub pos: Point,
}

/// Pick a uniformly random cell the snake does not cover.
///
/// Random sampling handles the common case; once the snake covers most of the
/// board the free cells are enumerated instead. `None` means the board is full.
pub fn place_food<R: Rng>(chain: &SnakeChain, grid: Grid, rng: &mut R) -> Option<Food> {
    if grid.cell_count() == 0 {
        return None;
    }

    for _ in 0..grid.cell_count() * SAMPLES_PER_CELL {
        let candidate = Point::new(rng.gen_range(0..grid.width), rng.gen_range(0..grid.height));
        if !chain.occupies_cell(candidate) {
            return Some(Food { pos: candidate });
        }
    }

    debug!("food sampling exhausted on a {grid} board with {} segments", chain.len());
    grid.cells()
        .filter(|&p| !chain.occupies_cell(p))
        .choose(rng)
        .map(|pos| Food { pos })
}
