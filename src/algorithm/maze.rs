//! Randomized depth-first maze carving
//!
//! Corridors are carved one cell at a time from a start cell. A cell is only
//! opened when doing so cannot complete a 2x2 block of open cells, which keeps
//! every corridor one cell wide. The walk uses an explicit frame stack, so
//! depth is bounded by the grid area rather than the thread's stack size.

use rand::Rng;
use tracing::debug;

use crate::io::error::{LevelError, Result};
use crate::spatial::grid::{Grid, Position, Structure};

/// Axis-aligned step taken while carving
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards row 0
    Up,
    /// Towards the last row
    Down,
    /// Towards column 0
    Left,
    /// Towards the last column
    Right,
}

impl Direction {
    /// Fixed cyclic order in which directions follow the first pick
    pub const ROTATION: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Column and row delta of one step
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Map a uniform draw in `[0, 1)` to a direction, one quarter each
    pub fn from_draw(value: f64) -> Self {
        let quarter = (value.clamp(0.0, 1.0) * 4.0) as usize;
        Self::ROTATION
            .get(quarter.min(3))
            .copied()
            .unwrap_or(Self::Right)
    }

    /// All four directions, starting here and following `ROTATION`
    pub fn visit_order(self) -> [Self; 4] {
        let start = Self::ROTATION
            .iter()
            .position(|&direction| direction == self)
            .unwrap_or(0);
        let mut order = Self::ROTATION;
        order.rotate_left(start);
        order
    }
}

// (dx, dy) towards each diagonal; each names one 2x2 window around a cell
const DIAGONALS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// Whether opening `pos` would complete a 2x2 block of open cells
pub fn opens_degenerate_room(grid: &Grid, pos: Position) -> bool {
    DIAGONALS.iter().any(|&(dx, dy)| {
        grid.is_open(pos.offset(dx, 0))
            && grid.is_open(pos.offset(0, dy))
            && grid.is_open(pos.offset(dx, dy))
    })
}

/// Whether the carver may open `pos`
///
/// Border cells, cells off the grid, already open cells and cells that would
/// complete a 2x2 room are all refused.
pub fn can_carve(grid: &Grid, pos: Position) -> bool {
    grid.contains(pos)
        && !grid.is_border(pos)
        && !grid.is_open(pos)
        && !opens_degenerate_room(grid, pos)
}

/// One cell on the carving stack and the next direction it will try
struct Frame {
    pos: Position,
    order: [Direction; 4],
    next: usize,
}

/// Carve corridors into `grid` starting from `start`
///
/// Each carved cell draws one value from `rng` to pick the first direction it
/// explores; the remaining three follow in `Direction::ROTATION` order.
/// Carving an already partially open grid extends it, but the 2x2 check makes
/// repeated calls carve less each time.
///
/// Returns the number of cells opened.
///
/// # Errors
///
/// Returns `InvalidStart` if `start` is on the border or outside the grid
pub fn carve_maze<R: Rng + ?Sized>(grid: &mut Grid, start: Position, rng: &mut R) -> Result<usize> {
    if !grid.contains(start) || grid.is_border(start) {
        return Err(LevelError::InvalidStart {
            x: start.x,
            y: start.y,
        });
    }

    let mut carved = 0;
    let mut stack = Vec::new();
    if let Some(frame) = enter(grid, start, rng)? {
        carved += 1;
        stack.push(frame);
    }

    while let Some(frame) = stack.last_mut() {
        let Some(direction) = frame.order.get(frame.next).copied() else {
            stack.pop();
            continue;
        };
        frame.next += 1;

        let (dx, dy) = direction.delta();
        let target = frame.pos.offset(dx, dy);
        if let Some(child) = enter(grid, target, rng)? {
            carved += 1;
            stack.push(child);
        }
    }

    debug!(carved, start_x = start.x, start_y = start.y, "maze carved");
    Ok(carved)
}

fn enter<R: Rng + ?Sized>(grid: &mut Grid, pos: Position, rng: &mut R) -> Result<Option<Frame>> {
    if !can_carve(grid, pos) {
        return Ok(None);
    }
    grid.set_structure(pos, Structure::Open)?;

    let first = Direction::from_draw(rng.random::<f64>());
    Ok(Some(Frame {
        pos,
        order: first.visit_order(),
        next: 0,
    }))
}
