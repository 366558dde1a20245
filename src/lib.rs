//! Procedural level generation for grid-based games
//!
//! Levels are three aligned layers (structure, entities and texture) over a
//! rectangular grid. Structures come from a randomized maze carver, a
//! cellular-automaton cave generator or a plain arena, markers are scattered
//! with a minimum separation, and finished levels serialize to a layered text
//! format.

#![forbid(unsafe_code)]

/// Structure generators, marker placement and the generation pipeline
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Level grid, cell types and distance metrics
pub mod spatial;

pub use io::error::{LevelError, Result};
