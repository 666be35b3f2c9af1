use crate::grid::{Axis, Direction, Grid, Point};
use log::debug;
use slotmap::{SlotMap, new_key_type};
use std::f32::consts::FRAC_PI_2;
use std::iter::FusedIterator;

new_key_type! {
    /// Stable handle for a segment inside the chain's arena.
    pub struct SegmentId;
}

pub const INITIAL_LENGTH: usize = 4;

/// The two neighbour directions a bend connects, named clockwise from `Up`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Corner {
    UpRight,
    RightDown,
    DownLeft,
    LeftUp,
}

impl Corner {
    fn joining(a: Direction, b: Direction) -> Option<Self> {
        use Direction::*;
        match (a, b) {
            (Up, Right) | (Right, Up) => Some(Corner::UpRight),
            (Right, Down) | (Down, Right) => Some(Corner::RightDown),
            (Down, Left) | (Left, Down) => Some(Corner::DownLeft),
            (Left, Up) | (Up, Left) => Some(Corner::LeftUp),
            _ => None,
        }
    }

    fn quarter_turns(self) -> u8 {
        match self {
            Corner::UpRight => 0,
            Corner::RightDown => 1,
            Corner::DownLeft => 2,
            Corner::LeftUp => 3,
        }
    }
}

/// What a segment looks like, with its orientation folded in.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Shape {
    /// Facing the direction of travel.
    Head(Direction),
    Body(Axis),
    Bend(Corner),
    /// Pointing away from the segment in front of it.
    Tail(Direction),
}

impl Shape {
    /// Clockwise rotation in radians, for sprites authored pointing up
    /// (body: vertical, bend: joining up and right).
    pub fn rotation(self) -> f32 {
        let turns = match self {
            Shape::Head(dir) | Shape::Tail(dir) => dir.quarter_turns(),
            Shape::Body(Axis::Vertical) => 0,
            Shape::Body(Axis::Horizontal) => 1,
            Shape::Bend(corner) => corner.quarter_turns(),
        };
        turns as f32 * FRAC_PI_2
    }

    pub fn is_head(self) -> bool {
        matches!(self, Shape::Head(_))
    }

    pub fn is_tail(self) -> bool {
        matches!(self, Shape::Tail(_))
    }
}

#[derive(Clone, Debug)]
pub struct Segment {
    pos: Point,
    shape: Shape,
    // toward the head
    prev: Option<SegmentId>,
    // toward the tail
    next: Option<SegmentId>,
}

impl Segment {
    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }
}

/// The snake's body: a doubly-linked list of segments living in an arena.
///
/// Links are arena keys rather than references, so the chain can push a new
/// head and drop its tail in constant time without shared ownership.
#[derive(Clone, Debug)]
pub struct SnakeChain {
    segments: SlotMap<SegmentId, Segment>,
    head: SegmentId,
    tail: SegmentId,
    dir: Direction,
    pending_dir: Direction,
    growth_pending: bool,
}

impl SnakeChain {
    /// Head at `start`, two body segments and a tail trailing to the left, facing right.
    pub fn new(start: Point, grid: Grid) -> Self {
        let mut segments = SlotMap::with_key();
        let blank = |pos| Segment { pos, shape: Shape::Body(Axis::Horizontal), prev: None, next: None };

        let head = segments.insert(blank(start));
        let mut tail = head;
        for i in 1..INITIAL_LENGTH as i32 {
            let id = segments.insert(blank(Point::new(start.x - i, start.y)));
            segments[id].prev = Some(tail);
            segments[tail].next = Some(id);
            tail = id;
        }

        let mut chain = Self {
            segments,
            head,
            tail,
            dir: Direction::Right,
            pending_dir: Direction::Right,
            growth_pending: false,
        };
        chain.assign_shapes();

        if !grid.contains(chain.tail().pos()) {
            debug!("snake created at {start} with its tail outside the {grid} board");
        }
        chain
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn head(&self) -> &Segment {
        &self.segments[self.head]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.tail]
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_dir
    }

    pub fn growth_pending(&self) -> bool {
        self.growth_pending
    }

    /// Queue a direction; whether it is taken is decided by `resolve_pending_direction`.
    pub fn set_pending_direction(&mut self, dir: Direction) {
        self.pending_dir = dir;
    }

    /// Commit the pending direction unless it reverses the snake or leads off the board.
    pub fn resolve_pending_direction(&mut self, grid: Grid) {
        let pending = self.pending_dir;
        if pending == self.dir.opposite() {
            return;
        }
        if grid.contains(self.head().pos() + pending.offset()) {
            self.dir = pending;
        }
    }

    pub fn peek_next_head(&self) -> Point {
        self.head().pos() + self.dir.offset()
    }

    /// The next `advance(true)` keeps the tail.
    pub fn mark_growth_pending(&mut self) {
        self.growth_pending = true;
    }

    /// Step one cell in the current direction. Without `grow` the tail is
    /// dropped; with it the snake gets one segment longer and the pending
    /// growth request is used up.
    pub fn advance(&mut self, grow: bool) {
        let pos = self.peek_next_head();
        let old_head = self.head;
        let new_head = self.segments.insert(Segment {
            pos,
            shape: Shape::Head(self.dir),
            prev: None,
            next: Some(old_head),
        });
        self.segments[old_head].prev = Some(new_head);
        self.head = new_head;

        if grow {
            self.growth_pending = false;
        } else if let Some(old_tail) = self.segments.remove(self.tail) {
            if let Some(new_tail) = old_tail.prev {
                self.segments[new_tail].next = None;
                self.tail = new_tail;
            }
        }

        self.assign_shapes();
    }

    pub fn occupies_cell(&self, p: Point) -> bool {
        self.segments().any(|seg| seg.pos() == p)
    }

    /// Head to tail.
    pub fn segments(&self) -> Segments<'_> {
        Segments { chain: self, cursor: Some(self.head), remaining: self.len() }
    }

    fn assign_shapes(&mut self) {
        self.segments[self.head].shape = Shape::Head(self.dir);

        let mut cursor = self.segments[self.head].next;
        while let Some(id) = cursor {
            let seg = &self.segments[id];
            let pos = seg.pos;
            let toward_head = seg.prev.and_then(|p| Direction::between(pos, self.segments[p].pos));

            let shape = match seg.next {
                None => Shape::Tail(toward_head.map_or(self.dir.opposite(), Direction::opposite)),
                Some(next) => {
                    let toward_tail = Direction::between(pos, self.segments[next].pos);
                    match (toward_head, toward_tail) {
                        (Some(a), Some(b)) if a.axis() == b.axis() => Shape::Body(a.axis()),
                        (Some(a), Some(b)) => {
                            Corner::joining(a, b).map_or(Shape::Body(a.axis()), Shape::Bend)
                        }
                        // neighbours are always adjacent; keep the old shape if not
                        _ => seg.shape,
                    }
                }
            };

            let seg = &mut self.segments[id];
            seg.shape = shape;
            cursor = seg.next;
        }
    }
}

pub struct Segments<'a> {
    chain: &'a SnakeChain,
    cursor: Option<SegmentId>,
    remaining: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let seg = &self.chain.segments[self.cursor?];
        self.cursor = seg.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(seg)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Segments<'_> {}

impl FusedIterator for Segments<'_> {}
