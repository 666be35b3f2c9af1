use crate::audio::{AudioSink, Cue};
use crate::chain::SnakeChain;
use crate::collision::check_collision;
use crate::food::{Food, place_food};
use crate::grid::{Direction, Grid};
use crate::speed::SpeedController;
use crate::state::GameState;
use log::{debug, info};
use rand::Rng;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Ending {
    Crashed,
    /// The snake filled the board.
    Cleared,
}

/// What a single frame of play did.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    Idle,
    Moved,
    Ate,
    Ended(Ending),
}

/// One play-through, from a fresh snake to game over.
#[derive(Clone, Debug)]
pub struct Round {
    grid: Grid,
    chain: SnakeChain,
    food: Food,
    state: GameState,
    speed: SpeedController,
    ending: Option<Ending>,
}

impl Round {
    pub fn new<R: Rng>(grid: Grid, rng: &mut R) -> Self {
        let mut round = Self {
            grid,
            chain: SnakeChain::new(grid.center(), grid),
            food: Food { pos: grid.center() },
            state: GameState::new(),
            speed: SpeedController::new(),
            ending: None,
        };
        round.restart(rng);
        round
    }

    /// Fresh snake, score and speed on the same board.
    pub fn restart<R: Rng>(&mut self, rng: &mut R) {
        self.chain = SnakeChain::new(self.grid.center(), self.grid);
        self.state.reset();
        self.speed.reset();
        self.ending = None;
        match place_food(&self.chain, self.grid, rng) {
            Some(food) => self.food = food,
            None => {
                self.end(Ending::Cleared);
            }
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn chain(&self) -> &SnakeChain {
        &self.chain
    }

    pub fn food(&self) -> Food {
        self.food
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn ending(&self) -> Option<Ending> {
        self.ending
    }

    pub fn steer(&mut self, dir: Direction) {
        self.chain.set_pending_direction(dir);
    }

    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
        info!("{}", if self.state.is_paused() { "paused" } else { "resumed" });
    }

    /// Run one frame. The snake only moves on frames the speed controller allows.
    pub fn step<R: Rng>(&mut self, rng: &mut R, audio: &mut dyn AudioSink) -> StepOutcome {
        if !self.state.is_running() || !self.speed.should_advance_this_tick() {
            return StepOutcome::Idle;
        }

        self.chain.resolve_pending_direction(self.grid);
        let next = self.chain.peek_next_head();

        if check_collision(next, &self.chain, self.food.pos, self.grid) {
            return self.end(Ending::Crashed);
        }

        let ate = next == self.food.pos;
        if ate {
            self.chain.mark_growth_pending();
            self.state.on_food_eaten();
            let delay = self.speed.adjust_for_level(self.state.level());
            audio.play(Cue::Bite);
            debug!("ate at {next}, score {}, delay {delay}", self.state.score());
        }

        self.chain.advance(self.chain.growth_pending());

        if !ate {
            return StepOutcome::Moved;
        }
        match place_food(&self.chain, self.grid, rng) {
            Some(food) => {
                self.food = food;
                StepOutcome::Ate
            }
            None => self.end(Ending::Cleared),
        }
    }

    fn end(&mut self, ending: Ending) -> StepOutcome {
        self.state.set_game_over();
        self.ending = Some(ending);
        info!(
            "round over ({ending:?}) with score {} at level {}, head at {}",
            self.state.score(),
            self.state.level(),
            self.chain.head().pos()
        );
        StepOutcome::Ended(ending)
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, pos: crate::grid::Point) {
        self.food = Food { pos };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::INITIAL_LENGTH;
    use crate::grid::Point;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Default)]
    struct Bites(usize);

    impl AudioSink for Bites {
        fn play(&mut self, cue: Cue) {
            if cue == Cue::Bite {
                self.0 += 1;
            }
        }
        fn pause(&mut self, _: Cue) {}
        fn stop(&mut self, _: Cue) {}
        fn rewind(&mut self, _: Cue) {}
    }

    // frames until the next move or end
    fn next_move(round: &mut Round, rng: &mut StdRng, audio: &mut Bites) -> StepOutcome {
        for _ in 0..100 {
            match round.step(rng, audio) {
                StepOutcome::Idle => continue,
                outcome => return outcome,
            }
        }
        panic!("snake never moved");
    }

    #[test]
    fn idles_between_moves() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut round = Round::new(Grid::new(20, 20), &mut rng);
        round.set_food(Point::new(0, 0));
        let mut audio = Bites::default();
        for _ in 0..19 {
            assert_eq!(round.step(&mut rng, &mut audio), StepOutcome::Idle);
        }
        assert_eq!(round.step(&mut rng, &mut audio), StepOutcome::Moved);
        assert_eq!(round.chain().head().pos(), Point::new(11, 10));
    }

    #[test]
    fn eating_grows_scores_and_respawns() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut round = Round::new(Grid::new(20, 20), &mut rng);
        round.set_food(Point::new(11, 10));
        let mut audio = Bites::default();

        assert_eq!(next_move(&mut round, &mut rng, &mut audio), StepOutcome::Ate);
        assert_eq!(round.chain().len(), INITIAL_LENGTH + 1);
        assert_eq!(round.state().score(), 1);
        assert_eq!(audio.0, 1);
        assert!(!round.chain().growth_pending());
        assert!(!round.chain().occupies_cell(round.food().pos));
    }

    #[test]
    fn crashing_into_the_wall_ends_the_round() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut round = Round::new(Grid::new(6, 3), &mut rng);
        round.set_food(Point::new(0, 0));
        let mut audio = Bites::default();

        assert_eq!(next_move(&mut round, &mut rng, &mut audio), StepOutcome::Moved);
        assert_eq!(next_move(&mut round, &mut rng, &mut audio), StepOutcome::Moved);
        assert_eq!(
            next_move(&mut round, &mut rng, &mut audio),
            StepOutcome::Ended(Ending::Crashed)
        );
        assert!(round.state().is_over());
        assert_eq!(round.ending(), Some(Ending::Crashed));
        assert_eq!(round.step(&mut rng, &mut audio), StepOutcome::Idle);
    }

    #[test]
    fn paused_round_does_not_move() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut round = Round::new(Grid::new(20, 20), &mut rng);
        round.toggle_pause();
        let mut audio = Bites::default();
        for _ in 0..100 {
            assert_eq!(round.step(&mut rng, &mut audio), StepOutcome::Idle);
        }
        assert_eq!(round.chain().head().pos(), Point::new(10, 10));
    }

    #[test]
    fn filling_the_board_is_a_win() {
        // 5x1: the snake covers four cells and the food the fifth
        let mut rng = StdRng::seed_from_u64(4);
        let grid = Grid::new(5, 1);
        let mut round = Round {
            grid,
            chain: SnakeChain::new(Point::new(3, 0), grid),
            food: Food { pos: Point::new(4, 0) },
            state: GameState::new(),
            speed: SpeedController::new(),
            ending: None,
        };
        let mut audio = Bites::default();

        assert_eq!(
            next_move(&mut round, &mut rng, &mut audio),
            StepOutcome::Ended(Ending::Cleared)
        );
        assert_eq!(round.chain().len(), 5);
        assert_eq!(round.state().score(), 1);
    }

    #[test]
    fn steering_turns_on_the_next_move() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut round = Round::new(Grid::new(20, 20), &mut rng);
        round.set_food(Point::new(0, 0));
        let mut audio = Bites::default();
        round.steer(Direction::Up);
        next_move(&mut round, &mut rng, &mut audio);
        assert_eq!(round.chain().head().pos(), Point::new(10, 9));
        round.steer(Direction::Down);
        next_move(&mut round, &mut rng, &mut audio);
        assert_eq!(round.chain().head().pos(), Point::new(10, 8));
    }

    #[test]
    fn restart_clears_progress() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut round = Round::new(Grid::new(6, 3), &mut rng);
        round.set_food(Point::new(4, 1));
        let mut audio = Bites::default();
        while round.ending().is_none() {
            round.step(&mut rng, &mut audio);
        }
        assert!(round.state().score() >= 1);

        round.restart(&mut rng);
        assert!(round.state().is_running());
        assert_eq!(round.state().score(), 0);
        assert_eq!(round.ending(), None);
        assert_eq!(round.chain().len(), INITIAL_LENGTH);
        assert_eq!(round.chain().head().pos(), Point::new(3, 1));
        assert!(!round.chain().occupies_cell(round.food().pos));
    }
}
