//! Frame throttle: the snake moves once every `delay` frames.

pub const BASE_DELAY: u32 = 20;
pub const MIN_DELAY: u32 = 5;
const DELAY_PER_LEVEL: u32 = 2;

#[derive(Clone, Debug)]
pub struct SpeedController {
    frame_count: u32,
    frame_delay: u32,
}

impl Default for SpeedController {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeedController {
    pub fn new() -> Self {
        Self { frame_count: 0, frame_delay: BASE_DELAY }
    }

    pub fn frame_delay(&self) -> u32 {
        self.frame_delay
    }

    /// Call once per frame; true on the frames where the snake should move.
    pub fn should_advance_this_tick(&mut self) -> bool {
        self.frame_count += 1;
        if self.frame_count >= self.frame_delay {
            self.frame_count = 0;
            true
        } else {
            false
        }
    }

    pub fn adjust_for_level(&mut self, level: u32) -> u32 {
        self.frame_delay = BASE_DELAY
            .saturating_sub(level.saturating_mul(DELAY_PER_LEVEL))
            .max(MIN_DELAY);
        self.frame_delay
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
