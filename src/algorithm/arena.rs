//! Enclosed square arenas around the spawn cell

use crate::io::configuration::{ARENA_LARGE, ARENA_MEDIUM, ARENA_SMALL};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::{Grid, Position, Structure};

/// Named arena sizes
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ArenaPreset {
    /// 5x5 open square
    Small,
    /// 11x11 open square
    Medium,
    /// 21x21 open square
    Large,
}

impl ArenaPreset {
    /// Side length of the open square
    pub const fn side(self) -> usize {
        match self {
            Self::Small => ARENA_SMALL,
            Self::Medium => ARENA_MEDIUM,
            Self::Large => ARENA_LARGE,
        }
    }
}

/// Wall in the whole grid, then open a `side x side` square centered on the spawn cell
///
/// The square is clipped to the interior so the border stays solid. Even
/// sides extend one cell further up and left than down and right.
///
/// Returns the number of cells opened.
///
/// # Errors
///
/// Returns `InvalidParameter` if `side` is zero
pub fn carve_arena(grid: &mut Grid, side: usize) -> Result<usize> {
    if side == 0 {
        return Err(invalid_parameter(
            "arena_size",
            &side,
            &"must be at least 1",
        ));
    }

    grid.fill_structure(Structure::Wall);

    let center = grid.spawn_cell();
    let before = (side / 2) as i32;
    let after = ((side - 1) / 2) as i32;
    let mut opened = 0;

    for y in (center.y - before)..=(center.y + after) {
        for x in (center.x - before)..=(center.x + after) {
            let pos = Position::new(x, y);
            if grid.contains(pos) && !grid.is_border(pos) {
                grid.set_structure(pos, Structure::Open)?;
                opened += 1;
            }
        }
    }
    Ok(opened)
}
