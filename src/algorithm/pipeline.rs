//! Level generation pipeline: shape the structure, place markers, hand back the grid

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{Level, debug, span};

use crate::algorithm::arena::carve_arena;
use crate::algorithm::cave::CaveGenerator;
use crate::algorithm::clearing::carve_clearings;
use crate::algorithm::maze::carve_maze;
use crate::algorithm::placement::{EntityPlacer, PlacementConstraint, PlacementReport};
use crate::io::configuration::{
    ARENA_MEDIUM, DEFAULT_DIMENSION, DEFAULT_MAX_SWEEPS, DEFAULT_SEED, DEFAULT_SMOOTHING_PASSES,
    DEFAULT_WALL_FILL_PERCENT, MAX_GRID_DIMENSION,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::serializer::LayeredSerializer;
use crate::spatial::grid::{Grid, Position, Structure};

/// How the structure layer is shaped
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Strategy {
    /// One-cell-wide corridors carved by a randomized backtracker
    #[default]
    Maze,
    /// Cellular-automaton caverns
    Cave,
    /// A single open square around the spawn cell
    Arena,
}

impl Strategy {
    /// Placement used when a request leaves it unset
    ///
    /// Arenas place six markers that only need distinct cells.
    pub fn default_placement(self) -> PlacementConstraint {
        match self {
            Self::Maze | Self::Cave => PlacementConstraint::default(),
            Self::Arena => PlacementConstraint::arena(),
        }
    }
}

/// Everything needed to generate one level
///
/// Requests are plain values; two generations from equal requests and equally
/// seeded random streams produce identical levels.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    /// Structure strategy
    pub strategy: Strategy,
    /// Grid width
    pub width: usize,
    /// Grid height
    pub height: usize,
    /// Cave seeding wall percentage (0 to 100)
    pub wall_fill_percent: u8,
    /// Cave smoothing passes
    pub smoothing_passes: u32,
    /// Maze start cell; the spawn cell when `None`
    pub maze_start: Option<Position>,
    /// Arena side length
    pub arena_size: usize,
    /// Circular clearings carved after shaping
    pub clearings: u32,
    /// Marker placement limits; the strategy's default when `None`
    pub placement: Option<PlacementConstraint>,
    /// Placement sweep budget
    pub max_sweeps: u32,
    /// Seed for `LevelGenerator::generate_seeded`
    pub seed: u64,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
            wall_fill_percent: DEFAULT_WALL_FILL_PERCENT,
            smoothing_passes: DEFAULT_SMOOTHING_PASSES,
            maze_start: None,
            arena_size: ARENA_MEDIUM,
            clearings: 0,
            placement: None,
            max_sweeps: DEFAULT_MAX_SWEEPS,
            seed: DEFAULT_SEED,
        }
    }
}

impl GenerationRequest {
    /// Placement constraint in effect for this request
    pub fn placement(&self) -> PlacementConstraint {
        self.placement
            .unwrap_or_else(|| self.strategy.default_placement())
    }

    /// Check the parameters that do not depend on the random stream
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first unusable field
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if self.strategy == Strategy::Arena && self.arena_size == 0 {
            return Err(invalid_parameter(
                "arena_size",
                &self.arena_size,
                &"must be at least 1",
            ));
        }
        CaveGenerator::new(self.wall_fill_percent)?;
        EntityPlacer::new(self.placement(), self.max_sweeps)?;
        Ok(())
    }
}

/// A generated level ready for serialization
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLevel {
    /// All three layers
    pub grid: Grid,
    /// Markers placed during generation, in placement order
    pub markers: Vec<Position>,
    /// Placement sweeps used
    pub sweeps: u32,
}

impl GeneratedLevel {
    /// Render the level with the given serializer
    pub fn to_text(&self, serializer: &LayeredSerializer) -> String {
        serializer.serialize(&self.grid)
    }
}

/// Runs the generation stages for one request
#[derive(Clone, Debug)]
pub struct LevelGenerator {
    request: GenerationRequest,
    cave: CaveGenerator,
    placer: EntityPlacer,
}

impl LevelGenerator {
    /// Validate a request and prepare its stages
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the request is unusable
    pub fn new(request: GenerationRequest) -> Result<Self> {
        request.validate()?;
        let cave = CaveGenerator::new(request.wall_fill_percent)?
            .with_smoothing_passes(request.smoothing_passes);
        let placer = EntityPlacer::new(request.placement(), request.max_sweeps)?;
        Ok(Self {
            request,
            cave,
            placer,
        })
    }

    /// Request this generator was built from
    pub const fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// Build the structure layer according to the strategy, then carve clearings
    ///
    /// # Errors
    ///
    /// Returns `InvalidStart` when a maze start lies on or outside the border
    pub fn build_structure<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Grid> {
        let request = &self.request;
        let mut grid = match request.strategy {
            Strategy::Maze => {
                let mut grid = Grid::new(request.width, request.height)?;
                let start = request.maze_start.unwrap_or_else(|| grid.spawn_cell());
                carve_maze(&mut grid, start, rng)?;
                grid
            }
            Strategy::Cave => self.cave.generate(request.width, request.height, rng)?,
            Strategy::Arena => {
                let mut grid = Grid::new(request.width, request.height)?;
                carve_arena(&mut grid, request.arena_size)?;
                grid
            }
        };

        if request.clearings > 0 {
            carve_clearings(&mut grid, request.clearings, rng)?;
        }
        Ok(grid)
    }

    /// Place markers on a shaped grid
    ///
    /// # Errors
    ///
    /// Returns `PlacementUnsatisfiable` when the constraint cannot be met
    pub fn populate<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> Result<PlacementReport> {
        self.placer.place(grid, rng)
    }

    /// Run every stage with a caller-supplied random stream
    ///
    /// # Errors
    ///
    /// Returns `InvalidStart` or `PlacementUnsatisfiable` from the stages
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GeneratedLevel> {
        self.generate_with(rng, |_| {})
    }

    /// Run every stage, calling `on_stage` with the number of stages finished
    ///
    /// `on_stage(1)` follows shaping and `on_stage(2)` follows placement.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStart` or `PlacementUnsatisfiable` from the stages
    pub fn generate_with<R, F>(&self, rng: &mut R, mut on_stage: F) -> Result<GeneratedLevel>
    where
        R: Rng + ?Sized,
        F: FnMut(usize),
    {
        let span = span!(Level::DEBUG, "generate_level", strategy = ?self.request.strategy);
        let _guard = span.enter();

        let mut grid = self.build_structure(rng)?;
        on_stage(1);
        let report = self.populate(&mut grid, rng)?;
        on_stage(2);
        debug!(
            open = grid.count_structure(Structure::Open),
            markers = report.placed.len(),
            sweeps = report.sweeps,
            "level generated"
        );

        Ok(GeneratedLevel {
            grid,
            markers: report.placed,
            sweeps: report.sweeps,
        })
    }

    /// Run every stage with a `StdRng` seeded from the request
    ///
    /// # Errors
    ///
    /// Returns `InvalidStart` or `PlacementUnsatisfiable` from the stages
    pub fn generate_seeded(&self) -> Result<GeneratedLevel> {
        let mut rng = StdRng::seed_from_u64(self.request.seed);
        self.generate(&mut rng)
    }
}

/// Generate a level from a request using its own seed
///
/// # Errors
///
/// Returns `InvalidParameter`, `InvalidStart` or `PlacementUnsatisfiable`
pub fn generate_level(request: GenerationRequest) -> Result<GeneratedLevel> {
    LevelGenerator::new(request)?.generate_seeded()
}
