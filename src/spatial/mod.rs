//! Spatial data structures for level layouts
//!
//! This module contains spatial-related functionality including:
//! - The layered level grid and its cell types
//! - The bitset backing the entity layer
//! - Distance metrics between cells

/// Distance metrics for marker separation
pub mod distance;
/// Layered grid with bounds-checked accessors
pub mod grid;
/// Bitset storage for the entity layer
pub mod occupancy;

pub use distance::{DistanceMetric, Octile};
pub use grid::{CellView, Entity, Grid, Position, Structure, Texture};
