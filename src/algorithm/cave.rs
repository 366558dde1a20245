//! Cellular-automaton cave generation
//!
//! A grid is seeded with random walls, framed by a solid border and split by
//! an open center row, then smoothed. Each smoothing pass reads the previous
//! generation in full before writing the next one. The thresholds are
//! asymmetric (walls survive at 4 neighbours, open cells close at 5), which
//! favours connected caverns over isolated pockets.

use ndarray::Array2;
use rand::Rng;
use tracing::debug;

use crate::io::configuration::{
    DEFAULT_SMOOTHING_PASSES, OPEN_CLOSE_THRESHOLD, WALL_COLLAPSE_THRESHOLD,
    WALL_SURVIVAL_THRESHOLD,
};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::{Grid, Position, Structure};

/// Cave generator parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaveGenerator {
    wall_fill_percent: u8,
    smoothing_passes: u32,
}

impl CaveGenerator {
    /// Create a generator seeding `wall_fill_percent` percent of cells as wall
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the percentage exceeds 100
    pub fn new(wall_fill_percent: u8) -> Result<Self> {
        if wall_fill_percent > 100 {
            return Err(invalid_parameter(
                "wall_fill_percent",
                &wall_fill_percent,
                &"must be between 0 and 100",
            ));
        }
        Ok(Self {
            wall_fill_percent,
            smoothing_passes: DEFAULT_SMOOTHING_PASSES,
        })
    }

    /// Use a different number of smoothing passes (zero skips smoothing)
    #[must_use]
    pub const fn with_smoothing_passes(mut self, passes: u32) -> Self {
        self.smoothing_passes = passes;
        self
    }

    /// Seeding wall percentage
    pub const fn wall_fill_percent(&self) -> u8 {
        self.wall_fill_percent
    }

    /// Number of smoothing passes run by `generate`
    pub const fn smoothing_passes(&self) -> u32 {
        self.smoothing_passes
    }

    /// Build a new seeded and smoothed cave grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for unusable dimensions
    pub fn generate<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Grid> {
        let mut grid = Grid::new(width, height)?;
        self.seed(&mut grid, rng)?;
        for pass in 0..self.smoothing_passes {
            let changed = smooth(&mut grid)?;
            debug!(pass, changed, "cave smoothing pass");
        }
        Ok(grid)
    }

    /// Overwrite the structure layer with random walls
    ///
    /// Border cells become walls, interior cells of the center row (`y ==
    /// height / 2`) become open, and every other interior cell becomes a wall
    /// when one uniform draw falls under the fill percentage.
    ///
    /// # Errors
    ///
    /// Propagates grid access errors, which correct bounds never produce
    pub fn seed<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> Result<()> {
        let center_row = (grid.height() / 2) as i32;
        let threshold = f64::from(self.wall_fill_percent);

        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let pos = Position::new(x, y);
                let structure = if grid.is_border(pos) {
                    Structure::Wall
                } else if y == center_row {
                    Structure::Open
                } else if rng.random::<f64>() * 100.0 < threshold {
                    Structure::Wall
                } else {
                    Structure::Open
                };
                grid.set_structure(pos, structure)?;
            }
        }
        Ok(())
    }
}

/// Number of walls among the 8 neighbours of `pos`, counting off-grid cells as walls
pub fn wall_neighbor_count(grid: &Grid, pos: Position) -> u8 {
    let mut walls = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if (dx, dy) != (0, 0) && grid.is_wall(pos.offset(dx, dy)) {
                walls += 1;
            }
        }
    }
    walls
}

/// Smoothing rule applied to one cell
pub const fn next_structure(current: Structure, wall_neighbors: u8) -> Structure {
    match current {
        Structure::Wall if wall_neighbors >= WALL_SURVIVAL_THRESHOLD => Structure::Wall,
        Structure::Wall if wall_neighbors < WALL_COLLAPSE_THRESHOLD => Structure::Open,
        Structure::Open if wall_neighbors >= OPEN_CLOSE_THRESHOLD => Structure::Wall,
        unchanged => unchanged,
    }
}

/// Run one smoothing pass over every cell and return how many cells changed
///
/// # Errors
///
/// Propagates grid errors, which a layer of the grid's own shape never produces
pub fn smooth(grid: &mut Grid) -> Result<usize> {
    let next = Array2::from_shape_fn((grid.height(), grid.width()), |(y, x)| {
        let pos = Position::new(x as i32, y as i32);
        let current = if grid.is_open(pos) {
            Structure::Open
        } else {
            Structure::Wall
        };
        next_structure(current, wall_neighbor_count(grid, pos))
    });

    let changed = next
        .iter()
        .zip(grid.structure_layer().iter())
        .filter(|(after, before)| after != before)
        .count();
    grid.replace_structure_layer(next)?;
    Ok(changed)
}
