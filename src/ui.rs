use crate::config::Config;
use crate::game::Ending;
use macroquad::prelude::*;

pub const TITLE_ITEMS: [&str; 2] = ["Play", "Settings"];
pub const GAME_OVER_ITEMS: [&str; 3] = ["Play Again", "Main Menu", "Exit"];

const ITEM_WIDTH: f32 = 200.0;
const ITEM_HEIGHT: f32 = 32.0;
const ITEM_FONT: f32 = 24.0;

const TEXT: Color = Color::new(0.92, 0.96, 0.86, 1.0);
const DIM: Color = Color::new(0.55, 0.62, 0.5, 1.0);
const ACCENT: Color = Color::new(0.55, 0.85, 0.3, 1.0);
const SHADE: Color = Color::new(0.0, 0.0, 0.0, 0.55);

/// Hit boxes of a vertical menu centred below the middle of the screen.
/// Drawing and click handling share this layout.
pub fn menu_rects(screen: Vec2, count: usize) -> Vec<Rect> {
    let left = (screen.x - ITEM_WIDTH) * 0.5;
    let top = screen.y * 0.5;
    (0..count)
        .map(|i| Rect::new(left, top + i as f32 * ITEM_HEIGHT, ITEM_WIDTH, ITEM_HEIGHT))
        .collect()
}

pub fn menu_item_at(point: Vec2, screen: Vec2, count: usize) -> Option<usize> {
    menu_rects(screen, count).iter().position(|r| r.contains(point))
}

fn draw_centered(text: &str, y: f32, size: f32, color: Color) {
    let m = measure_text(text, None, size as u16, 1.0);
    draw_text(text, (screen_width() - m.width) * 0.5, y, size, color);
}

fn draw_menu(items: &[&str], selected: usize) {
    let screen = vec2(screen_width(), screen_height());
    for (i, (item, rect)) in items.iter().zip(menu_rects(screen, items.len())).enumerate() {
        let color = if i == selected {
            draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, ACCENT);
            TEXT
        } else {
            DIM
        };
        let m = measure_text(item, None, ITEM_FONT as u16, 1.0);
        let baseline = rect.y + (rect.h + m.offset_y) * 0.5;
        draw_text(item, rect.x + (rect.w - m.width) * 0.5, baseline, ITEM_FONT, color);
    }
}

fn shade_screen() {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), SHADE);
}

pub fn draw_title(selected: usize) {
    draw_centered("SNAKE", screen_height() * 0.3, 56.0, ACCENT);
    draw_centered("Arrows/WASD to move, Enter to pause", screen_height() * 0.3 + 36.0, 18.0, DIM);
    draw_menu(&TITLE_ITEMS, selected);
}

pub fn draw_settings(config: &Config) {
    let mut y = screen_height() * 0.25;
    draw_centered("SETTINGS", y, 40.0, ACCENT);
    y += 48.0;

    let lines = [
        format!("Board: {} x {}", config.grid_width, config.grid_height),
        format!("Cell size: {}px", config.cell_size),
        format!("Volume: {:>3}%", (config.volume * 100.0).round() as i32),
        format!("Assets: {}", config.assets_dir.display()),
    ];
    for line in &lines {
        draw_centered(line, y, 20.0, TEXT);
        y += 26.0;
    }

    y += 16.0;
    draw_centered("Edit snake.json to change these", y, 18.0, DIM);
    draw_centered("Enter/Esc: Back", y + 24.0, 18.0, DIM);
}

pub fn draw_hud(score: u32, level: u32) {
    draw_text(&format!("Score: {score}  Level: {level}"), 8.0, 20.0, 22.0, TEXT);
}

pub fn draw_pause_overlay() {
    shade_screen();
    draw_centered("PAUSED", screen_height() * 0.5 - 20.0, 40.0, TEXT);
    draw_centered("Enter to resume", screen_height() * 0.5 + 8.0, 18.0, DIM);
}

pub fn draw_game_over(selected: usize, ending: Option<Ending>, score: u32) {
    shade_screen();
    let title = match ending {
        Some(Ending::Cleared) => "YOU WIN",
        _ => "GAME OVER",
    };
    draw_centered(title, screen_height() * 0.3, 44.0, ACCENT);
    draw_centered(&format!("Score: {score}"), screen_height() * 0.3 + 36.0, 24.0, TEXT);
    draw_menu(&GAME_OVER_ITEMS, selected);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Vec2 = Vec2::new(640.0, 480.0);

    #[test]
    fn items_stack_downward_and_centred() {
        let rects = menu_rects(SCREEN, 3);
        assert_eq!(rects.len(), 3);
        for pair in rects.windows(2) {
            assert_eq!(pair[1].y - pair[0].y, ITEM_HEIGHT);
        }
        assert_eq!(rects[0].x + rects[0].w * 0.5, SCREEN.x * 0.5);
    }

    #[test]
    fn clicks_hit_the_item_under_the_pointer() {
        let rects = menu_rects(SCREEN, 3);
        assert_eq!(menu_item_at(rects[1].center(), SCREEN, 3), Some(1));
        assert_eq!(menu_item_at(rects[2].point() + vec2(1.0, 1.0), SCREEN, 3), Some(2));
        assert_eq!(menu_item_at(vec2(5.0, 5.0), SCREEN, 3), None);
    }
}
