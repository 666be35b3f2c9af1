use crate::chain::Shape;
use crate::error::{Error, Result};
use crate::game::Round;
use crate::grid::{Grid, Point};
use log::{info, warn};
use macroquad::prelude::*;
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

const HEAD_SPRITE: &str = "snake_head.png";
const BODY_SPRITE: &str = "snake_body.png";
const BEND_SPRITE: &str = "snake_body_bend.png";
const TAIL_SPRITE: &str = "snake_tail.png";
const APPLE_SPRITE: &str = "apple.png";
const GROUND_SPRITE: &str = "tile_grass.png";
const BORDER_SIDE_SPRITE: &str = "border_side_vine.png";
const BORDER_CORNER_SPRITE: &str = "border_corner_vine.png";

const GROUND: Color = Color::new(0.18, 0.32, 0.14, 1.0);
const FOOD: Color = Color::new(0.85, 0.1, 0.1, 1.0);

/// Every texture the board is drawn with. All sprites are authored facing
/// up; see `Shape::rotation`.
pub struct SpriteAtlas {
    head: Texture2D,
    body: Option<Texture2D>,
    bend: Option<Texture2D>,
    tail: Option<Texture2D>,
    apple: Option<Texture2D>,
    ground: Option<Texture2D>,
    border: Option<BorderSprites>,
}

/// Side piece authored as the left edge, corner piece as the top-left.
struct BorderSprites {
    side: Texture2D,
    corner: Texture2D,
}

impl SpriteAtlas {
    /// The head sprite is required; the rest are skipped with a warning when missing.
    pub async fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(HEAD_SPRITE);
        let head = load_texture(&path.to_string_lossy())
            .await
            .map_err(|source| Error::Sprite { path: path.clone(), source })?;
        head.set_filter(FilterMode::Nearest);

        let atlas = Self {
            head,
            body: load_optional(dir, BODY_SPRITE).await,
            bend: load_optional(dir, BEND_SPRITE).await,
            tail: load_optional(dir, TAIL_SPRITE).await,
            apple: load_optional(dir, APPLE_SPRITE).await,
            ground: load_optional(dir, GROUND_SPRITE).await,
            border: match (
                load_optional(dir, BORDER_SIDE_SPRITE).await,
                load_optional(dir, BORDER_CORNER_SPRITE).await,
            ) {
                (Some(side), Some(corner)) => Some(BorderSprites { side, corner }),
                _ => None,
            },
        };
        info!("sprites loaded from {}", dir.display());
        Ok(atlas)
    }

    fn for_shape(&self, shape: Shape) -> Option<&Texture2D> {
        match shape {
            Shape::Head(_) => Some(&self.head),
            Shape::Body(_) => self.body.as_ref(),
            Shape::Bend(_) => self.bend.as_ref(),
            Shape::Tail(_) => self.tail.as_ref(),
        }
    }
}

async fn load_optional(dir: &Path, name: &str) -> Option<Texture2D> {
    let path = dir.join(name);
    match load_texture(&path.to_string_lossy()).await {
        Ok(texture) => {
            texture.set_filter(FilterMode::Nearest);
            Some(texture)
        }
        Err(err) => {
            warn!("sprite {} unavailable, it will not be drawn: {err}", path.display());
            None
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BorderPiece {
    Side,
    Corner,
}

/// The ring of edge cells the border is drawn over, with clockwise quarter
/// turns for each piece. Corners are listed first.
pub fn border_tiles(grid: Grid) -> Vec<(Point, BorderPiece, u8)> {
    let (right, bottom) = (grid.width - 1, grid.height - 1);
    let mut tiles = vec![
        (Point::new(0, 0), BorderPiece::Corner, 0),
        (Point::new(right, 0), BorderPiece::Corner, 1),
        (Point::new(right, bottom), BorderPiece::Corner, 2),
        (Point::new(0, bottom), BorderPiece::Corner, 3),
    ];
    for x in 1..right {
        tiles.push((Point::new(x, 0), BorderPiece::Side, 1));
        tiles.push((Point::new(x, bottom), BorderPiece::Side, 3));
    }
    for y in 1..bottom {
        tiles.push((Point::new(0, y), BorderPiece::Side, 0));
        tiles.push((Point::new(right, y), BorderPiece::Side, 2));
    }
    tiles
}

/// Square cells fitted into the window, letterboxed on the long side.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Viewport {
    pub origin: Vec2,
    pub tile: f32,
}

impl Viewport {
    pub fn fit(screen: Vec2, grid: Grid) -> Self {
        let tile = (screen.x / grid.width as f32).min(screen.y / grid.height as f32);
        let board = vec2(grid.width as f32, grid.height as f32) * tile;
        Self { origin: (screen - board) * 0.5, tile }
    }

    pub fn cell_rect(&self, p: Point) -> Rect {
        Rect::new(
            self.origin.x + p.x as f32 * self.tile,
            self.origin.y + p.y as f32 * self.tile,
            self.tile,
            self.tile,
        )
    }
}

pub struct Renderer {
    atlas: SpriteAtlas,
}

impl Renderer {
    pub fn new(atlas: SpriteAtlas) -> Self {
        Self { atlas }
    }

    pub fn draw_round(&self, round: &Round) {
        let grid = round.grid();
        let view = Viewport::fit(vec2(screen_width(), screen_height()), grid);

        self.draw_ground(grid, view);
        self.draw_border(grid, view);

        let food = view.cell_rect(round.food().pos);
        match &self.atlas.apple {
            Some(apple) => draw_sprite(apple, food, 0.0),
            None => draw_rectangle(food.x, food.y, food.w, food.h, FOOD),
        }

        for seg in round.chain().segments() {
            if !grid.contains(seg.pos()) {
                continue;
            }
            if let Some(texture) = self.atlas.for_shape(seg.shape()) {
                draw_sprite(texture, view.cell_rect(seg.pos()), seg.shape().rotation());
            }
        }
    }

    fn draw_ground(&self, grid: Grid, view: Viewport) {
        match &self.atlas.ground {
            Some(tile) => {
                for cell in grid.cells() {
                    draw_sprite(tile, view.cell_rect(cell), 0.0);
                }
            }
            None => {
                let size = vec2(grid.width as f32, grid.height as f32) * view.tile;
                draw_rectangle(view.origin.x, view.origin.y, size.x, size.y, GROUND);
            }
        }
    }

    fn draw_border(&self, grid: Grid, view: Viewport) {
        let Some(border) = &self.atlas.border else {
            return;
        };
        for (cell, piece, turns) in border_tiles(grid) {
            let texture = match piece {
                BorderPiece::Side => &border.side,
                BorderPiece::Corner => &border.corner,
            };
            draw_sprite(texture, view.cell_rect(cell), turns as f32 * FRAC_PI_2);
        }
    }
}

fn draw_sprite(texture: &Texture2D, rect: Rect, rotation: f32) {
    draw_texture_ex(
        texture,
        rect.x,
        rect.y,
        WHITE,
        DrawTextureParams { dest_size: Some(rect.size()), rotation, ..Default::default() },
    );
}
