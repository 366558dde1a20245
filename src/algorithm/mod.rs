/// Square arenas centered on the spawn cell
pub mod arena;
/// Cellular-automaton cave seeding and smoothing
pub mod cave;
/// Circular clearings carved into existing layouts
pub mod clearing;
/// Randomized depth-first maze carving
pub mod maze;
/// Marker placement under separation and count constraints
pub mod placement;
/// Generation requests and the stage pipeline that runs them
pub mod pipeline;
