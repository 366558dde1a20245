//! Pairwise cell distance used by marker placement

use crate::spatial::grid::Position;

/// Cost of one straight step in the octile metric
pub const STRAIGHT_COST: u32 = 10;

/// Cost of one diagonal step in the octile metric
pub const DIAGONAL_COST: u32 = 14;

/// Distance between two cells
///
/// Only relative comparisons are meaningful; implementations need not be a
/// true metric.
pub trait DistanceMetric {
    /// Distance from `a` to `b`
    fn distance(&self, a: Position, b: Position) -> u32;
}

/// Fixed-point octile distance: diagonal steps cost 14, straight steps 10
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Octile;

impl DistanceMetric for Octile {
    fn distance(&self, a: Position, b: Position) -> u32 {
        octile_distance(a, b)
    }
}

/// Octile distance `14 * min(dx, dy) + 10 * (max(dx, dy) - min(dx, dy))`
pub const fn octile_distance(a: Position, b: Position) -> u32 {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    let (short, long) = if dx < dy { (dx, dy) } else { (dy, dx) };
    DIAGONAL_COST * short + STRAIGHT_COST * (long - short)
}
