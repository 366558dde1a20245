//! Command-line interface for generating one or many level files

use crate::algorithm::arena::ArenaPreset;
use crate::algorithm::pipeline::{GenerationRequest, LevelGenerator, Strategy};
use crate::algorithm::placement::PlacementConstraint;
use crate::io::configuration::{
    ARENA_MEDIUM, DEFAULT_DIMENSION, DEFAULT_LEVEL_COUNT, DEFAULT_MAX_SWEEPS, DEFAULT_OUTPUT_FILE,
    DEFAULT_SEED, DEFAULT_SMOOTHING_PASSES, DEFAULT_WALL_FILL_PERCENT, PREVIEW_SCALE,
    PREVIEW_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::export_level_as_png;
use crate::io::progress::ProgressManager;
use crate::io::serializer::LayeredSerializer;
use crate::io::sink::{FileSink, LevelSink};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

/// Stages reported per level: structure, placement, output
const LEVEL_STAGES: usize = 3;

#[derive(Parser, Debug)]
#[command(name = "levelforge")]
#[command(
    author,
    version,
    about = "Generate layered tile-map levels from mazes, caves or arenas"
)]
/// Command-line arguments for the level generator
pub struct Cli {
    /// Structure strategy
    #[arg(long, value_enum, default_value_t = Strategy::Maze)]
    pub strategy: Strategy,

    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_DIMENSION)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_DIMENSION)]
    pub height: usize,

    /// Random seed; level i of a batch uses seed + i
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Cave wall fill percentage
    #[arg(short, long, default_value_t = DEFAULT_WALL_FILL_PERCENT)]
    pub fill: u8,

    /// Cave smoothing passes
    #[arg(long, default_value_t = DEFAULT_SMOOTHING_PASSES)]
    pub passes: u32,

    /// Arena side length
    #[arg(long, default_value_t = ARENA_MEDIUM)]
    pub arena_size: usize,

    /// Named arena size, overriding --arena-size
    #[arg(long, value_enum)]
    pub arena_preset: Option<ArenaPreset>,

    /// Circular clearings carved after shaping
    #[arg(long, default_value_t = 0)]
    pub clearings: u32,

    /// Minimum octile distance between markers [default: 50, arena 2]
    #[arg(long)]
    pub min_separation: Option<f64>,

    /// Markers placed per level [default: 30, arena 6]
    #[arg(long)]
    pub max_count: Option<usize>,

    /// Chance an eligible cell is considered during a sweep [default: 0.005]
    #[arg(long)]
    pub probability: Option<f64>,

    /// Placement sweeps before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_SWEEPS)]
    pub max_sweeps: u32,

    /// Number of levels to generate
    #[arg(short, long, default_value_t = DEFAULT_LEVEL_COUNT)]
    pub count: usize,

    /// Output file; batches insert _<index> before the extension
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Also write a PNG preview next to each level
    #[arg(short, long)]
    pub preview: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate levels even if the output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Generation request for level `index` of the batch
    ///
    /// Placement flags left unset fall back to the strategy's defaults.
    pub fn request(&self, index: usize) -> GenerationRequest {
        let defaults = self.strategy.default_placement();
        GenerationRequest {
            strategy: self.strategy,
            width: self.width,
            height: self.height,
            wall_fill_percent: self.fill,
            smoothing_passes: self.passes,
            maze_start: None,
            arena_size: self.arena_preset.map_or(self.arena_size, ArenaPreset::side),
            clearings: self.clearings,
            placement: Some(PlacementConstraint {
                min_separation: self.min_separation.unwrap_or(defaults.min_separation),
                max_count: self.max_count.unwrap_or(defaults.max_count),
                candidate_probability: self.probability.unwrap_or(defaults.candidate_probability),
            }),
            max_sweeps: self.max_sweeps,
            seed: self.seed.wrapping_add(index as u64),
        }
    }

    /// Output path for level `index`
    pub fn output_path(&self, index: usize) -> PathBuf {
        if self.count <= 1 {
            return self.output.clone();
        }
        with_stem_suffix(&self.output, &format!("_{index}"), None)
    }

    /// Preview image path belonging to a level output path
    pub fn preview_path(output_path: &Path) -> PathBuf {
        with_stem_suffix(output_path, PREVIEW_SUFFIX, Some("png"))
    }
}

fn with_stem_suffix(path: &Path, suffix: &str, extension: Option<&str>) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let extension = extension.map_or_else(
        || {
            path.extension()
                .map(|ext| ext.to_string_lossy().to_string())
        },
        |ext| Some(ext.to_string()),
    );
    let name = match extension {
        Some(ext) => format!("{stem}{suffix}.{ext}"),
        None => format!("{stem}{suffix}"),
    };

    if let Some(parent) = path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Orchestrates batch generation with progress tracking
pub struct LevelProcessor<S: LevelSink = FileSink> {
    cli: Cli,
    serializer: LayeredSerializer,
    sink: S,
    progress_manager: Option<ProgressManager>,
}

impl LevelProcessor {
    /// Create a processor writing levels to files
    pub fn new(cli: Cli) -> Self {
        Self::with_sink(cli, FileSink::new())
    }
}

impl<S: LevelSink> LevelProcessor<S> {
    /// Create a processor handing levels to a custom sink
    pub fn with_sink(cli: Cli, sink: S) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            serializer: LayeredSerializer::default(),
            sink,
            progress_manager,
        }
    }

    /// Sink receiving the generated levels
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Generate every level requested on the command line
    ///
    /// # Errors
    ///
    /// Returns an error if a request is invalid, generation fails or an
    /// output cannot be written
    pub fn process(&mut self) -> Result<()> {
        let pending = self.collect_pending();

        if pending.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(pending.len());
        }

        for (slot, &index) in pending.iter().enumerate() {
            self.process_level(slot, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_pending(&self) -> Vec<usize> {
        (0..self.cli.count)
            .filter(|&index| self.should_generate(&self.cli.output_path(index)))
            .collect()
    }

    fn should_generate(&self, output_path: &Path) -> bool {
        if !self.cli.skip_existing() || !output_path.exists() {
            return true;
        }

        // Allow print for user feedback for skipped outputs
        #[allow(clippy::print_stderr)]
        if !self.cli.quiet {
            eprintln!("Skipping: {} (output exists)", output_path.display());
        }
        false
    }

    fn process_level(&mut self, slot: usize, index: usize) -> Result<()> {
        let output_path = self.cli.output_path(index);
        let request = self.cli.request(index);
        let mut rng = StdRng::seed_from_u64(request.seed);
        let generator = LevelGenerator::new(request)?;

        if let Some(ref mut pm) = self.progress_manager {
            let name = output_path.file_name().unwrap_or_default().to_string_lossy();
            pm.start_level(slot, &name, LEVEL_STAGES);
        }

        let level = generator.generate_with(&mut rng, |stage| {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_stage(slot, stage);
            }
        })?;

        let text = level.to_text(&self.serializer);
        self.sink.accept(&output_path, &text)?;
        if self.cli.preview {
            export_level_as_png(&level.grid, PREVIEW_SCALE, &Cli::preview_path(&output_path))?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_level(slot);
        }

        Ok(())
    }
}
