use crate::chain::SnakeChain;
use crate::grid::{Grid, Point};

/// Whether moving the head onto `candidate` ends the game.
///
/// The tail cell only counts as free when this move drops the tail, which is
/// the case unless growth is already pending or the candidate holds the food.
pub fn check_collision(candidate: Point, chain: &SnakeChain, food: Point, grid: Grid) -> bool {
    if !grid.contains(candidate) {
        return true;
    }

    let grows = chain.growth_pending() || candidate == food;
    if !grows && candidate == chain.tail().pos() {
        return false;
    }

    chain.occupies_cell(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction::{self, *};

    const GRID: Grid = Grid::new(8, 8);
    const NO_FOOD: Point = Point::new(7, 7);

    fn step(chain: &mut SnakeChain, dir: Direction) {
        chain.set_pending_direction(dir);
        chain.resolve_pending_direction(GRID);
        chain.advance(false);
    }

    // length 4 coiled so that turning up leads straight into the tail
    fn coiled() -> SnakeChain {
        let mut chain = SnakeChain::new(Point::new(3, 1), GRID);
        step(&mut chain, Down);
        step(&mut chain, Left);
        chain.set_pending_direction(Up);
        chain.resolve_pending_direction(GRID);
        chain
    }

    #[test]
    fn walls() {
        let chain = SnakeChain::new(Point::new(3, 1), GRID);
        for p in [Point::new(-1, 1), Point::new(8, 1), Point::new(3, -1), Point::new(3, 8)] {
            assert!(check_collision(p, &chain, NO_FOOD, GRID), "{p} should be a wall");
        }
        assert!(!check_collision(Point::new(4, 1), &chain, NO_FOOD, GRID));
    }

    #[test]
    fn chasing_the_tail_is_safe_while_moving() {
        let chain = coiled();
        let candidate = chain.peek_next_head();
        assert_eq!(candidate, chain.tail().pos());
        assert!(!check_collision(candidate, &chain, NO_FOOD, GRID));
    }

    #[test]
    fn chasing_the_tail_is_fatal_while_growing() {
        let mut chain = coiled();
        chain.mark_growth_pending();
        let candidate = chain.peek_next_head();
        assert!(check_collision(candidate, &chain, NO_FOOD, GRID));
    }

    #[test]
    fn food_on_the_tail_cell_means_growth() {
        let chain = coiled();
        let candidate = chain.peek_next_head();
        assert!(check_collision(candidate, &chain, candidate, GRID));
    }

    #[test]
    fn body_is_always_fatal() {
        let chain = coiled();
        let body = chain.segments().nth(2).map(|s| s.pos());
        let body = body.expect("chain has four segments");
        assert!(check_collision(body, &chain, NO_FOOD, GRID));
        assert!(check_collision(chain.head().pos(), &chain, NO_FOOD, GRID));
    }
}
