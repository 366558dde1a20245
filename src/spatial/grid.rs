//! Layered level grid with bounds-checked cell access
//!
//! A level is three aligned layers over the same `width x height` cells:
//! the structure layer (open floor or wall), the entity layer (markers such as
//! enemy spawns) and a decorative texture layer. Structure and texture are
//! row-major `ndarray` buffers indexed `[y, x]`; the entity layer is a bitset.
//! Coordinates are signed so neighbour offsets may step off the grid, where
//! every cell reads as wall.

use ndarray::Array2;

use crate::io::configuration::{MAX_GRID_DIMENSION, NEUTRAL_TEXTURE};
use crate::io::error::{LevelError, Result, invalid_parameter};
use crate::spatial::occupancy::Occupancy;

/// Walkability of a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Structure {
    /// Walkable floor
    Open,
    /// Blocked cell
    #[default]
    Wall,
}

/// Content of the entity layer for one cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Entity {
    /// Nothing spawns here
    #[default]
    Vacant,
    /// A spawn marker (e.g. an enemy)
    Marker,
}

/// Decorative texture value, stored as one printable ASCII byte
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Texture(u8);

impl Texture {
    /// Texture every fresh grid starts with
    pub const NEUTRAL: Self = Self(NEUTRAL_TEXTURE);

    /// Wrap a byte, rejecting anything that is not printable ASCII
    pub const fn new(byte: u8) -> Option<Self> {
        if byte.is_ascii_graphic() {
            Some(Self(byte))
        } else {
            None
        }
    }

    /// Raw byte value
    pub const fn byte(self) -> u8 {
        self.0
    }

    /// Character used when the texture layer is printed
    pub const fn glyph(self) -> char {
        self.0 as char
    }
}

impl Default for Texture {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Cell coordinate, `x` across columns and `y` down rows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Position {
    /// Create a position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by the given deltas
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snapshot of all three layers at one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellView {
    /// Structure layer value
    pub structure: Structure,
    /// Entity layer value
    pub entity: Entity,
    /// Texture layer value
    pub texture: Texture,
}

/// Level grid owning the structure, entity and texture layers
///
/// Markers are kept disjoint from walls: a marker can only be set on an open
/// cell, and walling a cell clears its marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    structure: Array2<Structure>,
    entities: Occupancy,
    texture: Array2<Texture>,
}

impl Grid {
    /// Create a grid of walls with no markers and neutral texture
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero or exceeds
    /// `MAX_GRID_DIMENSION`
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, Structure::Wall)
    }

    /// Create a grid whose structure layer is uniformly `structure`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero or exceeds
    /// `MAX_GRID_DIMENSION`
    pub fn filled(width: usize, height: usize, structure: Structure) -> Result<Self> {
        validate_dimension("width", width)?;
        validate_dimension("height", height)?;

        Ok(Self {
            width,
            height,
            structure: Array2::from_elem((height, width), structure),
            entities: Occupancy::new(width * height),
            texture: Array2::from_elem((height, width), Texture::NEUTRAL),
        })
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether a position addresses a cell of this grid
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Whether a position lies on the outermost ring of cells
    pub const fn is_border(&self, pos: Position) -> bool {
        self.contains(pos)
            && (pos.x == 0
                || pos.y == 0
                || pos.x as usize == self.width - 1
                || pos.y as usize == self.height - 1)
    }

    /// Center cell reserved as the player start
    pub const fn spawn_cell(&self) -> Position {
        Position {
            x: (self.width / 2) as i32,
            y: (self.height / 2) as i32,
        }
    }

    /// All three layers at a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position is outside the grid
    pub fn get(&self, pos: Position) -> Result<CellView> {
        Ok(CellView {
            structure: self.structure(pos)?,
            entity: self.entity(pos)?,
            texture: self.texture(pos)?,
        })
    }

    /// Structure layer value at a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position is outside the grid
    pub fn structure(&self, pos: Position) -> Result<Structure> {
        let cell = self.checked_cell(pos)?;
        self.structure
            .get(cell)
            .copied()
            .ok_or_else(|| self.out_of_bounds(pos))
    }

    /// Entity layer value at a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position is outside the grid
    pub fn entity(&self, pos: Position) -> Result<Entity> {
        let index = self.checked_index(pos)?;
        Ok(if self.entities.contains(index) {
            Entity::Marker
        } else {
            Entity::Vacant
        })
    }

    /// Texture layer value at a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position is outside the grid
    pub fn texture(&self, pos: Position) -> Result<Texture> {
        let cell = self.checked_cell(pos)?;
        self.texture
            .get(cell)
            .copied()
            .ok_or_else(|| self.out_of_bounds(pos))
    }

    /// Set the structure at a cell; walling a cell removes its marker
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position is outside the grid
    pub fn set_structure(&mut self, pos: Position, value: Structure) -> Result<()> {
        let cell = self.checked_cell(pos)?;
        let index = self.checked_index(pos)?;
        if let Some(slot) = self.structure.get_mut(cell) {
            *slot = value;
        }
        if value == Structure::Wall {
            self.entities.set(index, false);
        }
        Ok(())
    }

    /// Set the entity at a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position is outside the grid, or
    /// `InvalidParameter` when placing a marker on a wall
    pub fn set_entity(&mut self, pos: Position, value: Entity) -> Result<()> {
        let index = self.checked_index(pos)?;
        if value == Entity::Marker && !self.is_open(pos) {
            return Err(invalid_parameter(
                "entity",
                &format!("({}, {})", pos.x, pos.y),
                &"markers can only be placed on open cells",
            ));
        }
        self.entities.set(index, value == Entity::Marker);
        Ok(())
    }

    /// Set the texture at a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position is outside the grid
    pub fn set_texture(&mut self, pos: Position, value: Texture) -> Result<()> {
        let cell = self.checked_cell(pos)?;
        if let Some(slot) = self.texture.get_mut(cell) {
            *slot = value;
        }
        Ok(())
    }

    /// Whether a cell is walkable; anything off the grid is not
    pub fn is_open(&self, pos: Position) -> bool {
        self.checked_cell(pos)
            .ok()
            .and_then(|cell| self.structure.get(cell))
            .is_some_and(|&structure| structure == Structure::Open)
    }

    /// Whether a cell counts as wall; anything off the grid does
    pub fn is_wall(&self, pos: Position) -> bool {
        !self.is_open(pos)
    }

    /// Whether a cell holds a marker; anything off the grid does not
    pub fn has_marker(&self, pos: Position) -> bool {
        self.flat_index(pos)
            .is_some_and(|index| self.entities.contains(index))
    }

    /// Overwrite the whole structure layer
    ///
    /// Filling with walls also clears every marker.
    pub fn fill_structure(&mut self, value: Structure) {
        self.structure.fill(value);
        if value == Structure::Wall {
            self.entities.clear();
        }
    }

    /// Number of cells with the given structure
    pub fn count_structure(&self, value: Structure) -> usize {
        self.structure.iter().filter(|&&cell| cell == value).count()
    }

    /// Marker positions in row-major order
    pub fn markers(&self) -> Vec<Position> {
        self.entities
            .iter_occupied()
            .map(|index| self.position_of(index))
            .collect()
    }

    /// Number of markers on the grid
    pub fn marker_count(&self) -> usize {
        self.entities.count()
    }

    /// Remove every marker
    pub fn clear_markers(&mut self) {
        self.entities.clear();
    }

    /// Every cell position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Position::new(x as i32, y as i32))
        })
    }

    /// Read-only view of the structure layer, indexed `[y, x]`
    pub const fn structure_layer(&self) -> &Array2<Structure> {
        &self.structure
    }

    /// Swap in a whole new structure layer, clearing markers that end up on walls
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the layer shape differs from the grid
    pub fn replace_structure_layer(&mut self, layer: Array2<Structure>) -> Result<()> {
        if layer.dim() != (self.height, self.width) {
            return Err(invalid_parameter(
                "structure_layer",
                &format!("{:?}", layer.dim()),
                &format!("expected shape ({}, {})", self.height, self.width),
            ));
        }
        self.structure = layer;

        let stranded: Vec<usize> = self
            .entities
            .iter_occupied()
            .filter(|&index| self.is_wall(self.position_of(index)))
            .collect();
        for index in stranded {
            self.entities.set(index, false);
        }
        Ok(())
    }

    /// Row-major index of a position, if it is on the grid
    pub const fn flat_index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y as usize * self.width + pos.x as usize)
        } else {
            None
        }
    }

    const fn position_of(&self, index: usize) -> Position {
        Position {
            x: (index % self.width) as i32,
            y: (index / self.width) as i32,
        }
    }

    fn checked_cell(&self, pos: Position) -> Result<[usize; 2]> {
        if self.contains(pos) {
            Ok([pos.y as usize, pos.x as usize])
        } else {
            Err(self.out_of_bounds(pos))
        }
    }

    fn checked_index(&self, pos: Position) -> Result<usize> {
        self.flat_index(pos).ok_or_else(|| self.out_of_bounds(pos))
    }

    const fn out_of_bounds(&self, pos: Position) -> LevelError {
        LevelError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: self.width,
            height: self.height,
        }
    }
}

fn validate_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 || value > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}
