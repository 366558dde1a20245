//! Generation constants and runtime configuration defaults

// Grid defaults
/// Default grid width and height
pub const DEFAULT_DIMENSION: usize = 127;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Byte stored in every texture cell of a fresh grid
pub const NEUTRAL_TEXTURE: u8 = b'0';

// Cave generation
/// Default chance, in percent, that an interior cell is seeded as wall
pub const DEFAULT_WALL_FILL_PERCENT: u8 = 40;

/// Default number of smoothing passes after seeding
pub const DEFAULT_SMOOTHING_PASSES: u32 = 1;

/// A wall with at least this many wall neighbours stays a wall
pub const WALL_SURVIVAL_THRESHOLD: u8 = 4;

/// A wall with fewer than this many wall neighbours opens up
pub const WALL_COLLAPSE_THRESHOLD: u8 = 2;

/// An open cell with at least this many wall neighbours becomes a wall
pub const OPEN_CLOSE_THRESHOLD: u8 = 5;

// Arena layouts
/// Side length of the small arena preset
pub const ARENA_SMALL: usize = 5;
/// Side length of the medium arena preset
pub const ARENA_MEDIUM: usize = 11;
/// Side length of the large arena preset
pub const ARENA_LARGE: usize = 21;

/// Markers placed in an arena unless the request says otherwise
pub const ARENA_MAX_COUNT: usize = 6;

/// Arena markers only need to occupy distinct cells
pub const ARENA_MIN_SEPARATION: f64 = 2.0;

// Clearings
/// Smallest clearing radius (inclusive)
pub const CLEARING_MIN_RADIUS: i32 = 5;
/// Largest clearing radius (exclusive)
pub const CLEARING_MAX_RADIUS: i32 = 20;

// Marker placement
/// Default minimum octile distance between two markers
pub const DEFAULT_MIN_SEPARATION: f64 = 50.0;

/// Default maximum number of markers per level
pub const DEFAULT_MAX_COUNT: usize = 30;

// Keeps the first sweep from filling the grid in reading order
/// Default per-cell chance of being considered as a candidate
pub const DEFAULT_CANDIDATE_PROBABILITY: f64 = 0.005;

/// Default number of full-grid sweeps before placement gives up
pub const DEFAULT_MAX_SWEEPS: u32 = 1000;

// Serialization glyphs
/// Glyph for walkable cells
pub const OPEN_GLYPH: char = '.';
/// Glyph for blocked cells
pub const WALL_GLYPH: char = 'A';
/// Glyph for a placed marker
pub const MARKER_GLYPH: char = '1';
/// Glyph for a cell without a marker
pub const VACANT_GLYPH: char = '0';

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of levels generated per invocation
pub const DEFAULT_LEVEL_COUNT: usize = 1;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Output settings
/// File written when no output path is given
pub const DEFAULT_OUTPUT_FILE: &str = "Map.dat.txt";
/// Suffix added to preview image filenames
pub const PREVIEW_SUFFIX: &str = "_preview";
/// Pixels per cell in preview images
pub const PREVIEW_SCALE: u32 = 4;

// Preview colours (RGBA)
/// Wall colour
pub const WALL_COLOR: [u8; 4] = [40, 36, 48, 255];
/// Open floor colour
pub const OPEN_COLOR: [u8; 4] = [214, 205, 180, 255];
/// Marker colour
pub const MARKER_COLOR: [u8; 4] = [196, 48, 43, 255];
/// Spawn cell colour
pub const SPAWN_COLOR: [u8; 4] = [64, 160, 80, 255];
