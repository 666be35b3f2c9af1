use derive_more::{Add, Display, Sub};
use Direction::*;

/// A cell coordinate. `y` grows downward, matching screen space.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Add, Sub, Display)]
#[display(fmt = "({}, {})", x, y)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Right, Down, Left];

    pub fn offset(self) -> Point {
        match self {
            Up => Point::new(0, -1),
            Down => Point::new(0, 1),
            Left => Point::new(-1, 0),
            Right => Point::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Up | Down => Axis::Vertical,
            Left | Right => Axis::Horizontal,
        }
    }

    /// The unit step leading from `from` to `to`, if they are orthogonal neighbours.
    pub fn between(from: Point, to: Point) -> Option<Self> {
        let delta = to - from;
        Self::ALL.into_iter().find(|d| d.offset() == delta)
    }

    /// Clockwise quarter turns away from `Up`.
    pub fn quarter_turns(self) -> u8 {
        match self {
            Up => 0,
            Right => 1,
            Down => 2,
            Left => 3,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Board dimensions in cells.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display)]
#[display(fmt = "{}x{}", width, height)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }

    pub fn cell_count(self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    /// Every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Point> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }
}
