use log::info;

pub const POINTS_PER_LEVEL: u32 = 5;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    Paused,
    Over,
}

/// Score, level and whether the round is still live.
///
/// A single `Phase` replaces separate paused/over flags, so "paused after
/// game over" cannot be represented.
#[derive(Clone, Debug)]
pub struct GameState {
    score: u32,
    level: u32,
    phase: Phase,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self { score: 0, level: 1, phase: Phase::Running }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn on_food_eaten(&mut self) {
        self.score += 1;
        if self.score % POINTS_PER_LEVEL == 0 {
            self.level += 1;
            info!("level {} reached at score {}", self.level, self.score);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Over => Phase::Over,
        };
    }

    pub fn set_game_over(&mut self) {
        self.phase = Phase::Over;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_every_five_points() {
        let mut state = GameState::new();
        assert_eq!((state.score(), state.level()), (0, 1));
        for _ in 0..4 {
            state.on_food_eaten();
        }
        assert_eq!(state.level(), 1);
        state.on_food_eaten();
        assert_eq!((state.score(), state.level()), (5, 2));
        for _ in 0..5 {
            state.on_food_eaten();
        }
        assert_eq!((state.score(), state.level()), (10, 3));
    }

    #[test]
    fn pause_toggles() {
        let mut state = GameState::new();
        state.toggle_pause();
        assert!(state.is_paused());
        assert!(!state.is_running());
        state.toggle_pause();
        assert!(state.is_running());
    }

    #[test]
    fn game_over_is_final_until_reset() {
        let mut state = GameState::new();
        state.toggle_pause();
        state.set_game_over();
        assert!(!state.is_running());
        state.toggle_pause();
        assert!(state.is_over());
        assert!(!state.is_running());

        state.on_food_eaten();
        state.reset();
        assert!(state.is_running());
        assert_eq!((state.score(), state.level()), (0, 1));
    }
}
