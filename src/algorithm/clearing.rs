//! Circular clearings punched into an existing layout

use rand::Rng;
use tracing::debug;

use crate::io::configuration::{CLEARING_MAX_RADIUS, CLEARING_MIN_RADIUS};
use crate::io::error::Result;
use crate::spatial::grid::{Grid, Position, Structure};

/// Open every interior cell within `radius` of `center`
///
/// Border cells are left untouched. Returns the number of cells that were
/// walls before.
///
/// # Errors
///
/// Propagates grid access errors, which in-bounds cells never produce
pub fn carve_clearing(grid: &mut Grid, center: Position, radius: i32) -> Result<usize> {
    let radius = radius.max(0);
    let mut opened = 0;

    for y in (center.y - radius)..=(center.y + radius) {
        for x in (center.x - radius)..=(center.x + radius) {
            let pos = Position::new(x, y);
            let (dx, dy) = (x - center.x, y - center.y);
            if dx * dx + dy * dy > radius * radius
                || !grid.contains(pos)
                || grid.is_border(pos)
            {
                continue;
            }
            if grid.is_wall(pos) {
                opened += 1;
            }
            grid.set_structure(pos, Structure::Open)?;
        }
    }
    Ok(opened)
}

/// Carve `count` clearings with random interior centers and random radii
///
/// Radii are drawn from `CLEARING_MIN_RADIUS..CLEARING_MAX_RADIUS`. Grids
/// without an interior are left unchanged.
///
/// # Errors
///
/// Propagates grid access errors, which in-bounds cells never produce
pub fn carve_clearings<R: Rng + ?Sized>(grid: &mut Grid, count: u32, rng: &mut R) -> Result<usize> {
    if grid.width() < 3 || grid.height() < 3 {
        return Ok(0);
    }

    let max_x = grid.width() as i32 - 2;
    let max_y = grid.height() as i32 - 2;
    let mut opened = 0;

    for _ in 0..count {
        let center = Position::new(rng.random_range(1..=max_x), rng.random_range(1..=max_y));
        let radius = rng.random_range(CLEARING_MIN_RADIUS..CLEARING_MAX_RADIUS);
        opened += carve_clearing(grid, center, radius)?;
    }

    debug!(count, opened, "clearings carved");
    Ok(opened)
}
