use crate::grid::Direction;
use macroquad::prelude::*;

const CONFIRM_KEYS: [KeyCode; 3] = [KeyCode::Enter, KeyCode::KpEnter, KeyCode::Space];

/// Everything pressed during one frame. Only "just pressed" events are
/// reported; held keys never repeat.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputFrame {
    pub direction: Option<Direction>,
    pub confirm: bool,
    pub back: bool,
    pub quit: bool,
    /// Left click position in screen pixels.
    pub click: Option<Vec2>,
    /// Window size when the frame was polled, for hit-testing clicks.
    pub screen: Vec2,
}

impl InputFrame {
    pub fn poll() -> Self {
        let direction = if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
            Some(Direction::Up)
        } else if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S) {
            Some(Direction::Down)
        } else if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) {
            Some(Direction::Left)
        } else if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) {
            Some(Direction::Right)
        } else {
            None
        };

        let click = is_mouse_button_pressed(MouseButton::Left).then(|| Vec2::from(mouse_position()));

        Self {
            direction,
            confirm: CONFIRM_KEYS.into_iter().any(is_key_pressed),
            back: is_key_pressed(KeyCode::Escape),
            quit: is_key_pressed(KeyCode::Q),
            click,
            screen: vec2(screen_width(), screen_height()),
        }
    }

    pub fn steer(direction: Direction) -> Self {
        Self { direction: Some(direction), ..Self::default() }
    }

    pub fn confirm() -> Self {
        Self { confirm: true, ..Self::default() }
    }

    pub fn back() -> Self {
        Self { back: true, ..Self::default() }
    }

    pub fn click(at: Vec2, screen: Vec2) -> Self {
        Self { click: Some(at), screen, ..Self::default() }
    }
}
