//! Layered text format for levels
//!
//! A serialized level is three blocks, one per layer in the order structure,
//! entity, texture. Each block holds one line of `width` glyphs per row, every
//! line terminated by `\n`, and is followed by one blank line. The spawn cell
//! always renders as open and vacant.

use crate::io::configuration::{MARKER_GLYPH, OPEN_GLYPH, VACANT_GLYPH, WALL_GLYPH};
use crate::io::error::{Result, invalid_parameter, parse_error};
use crate::spatial::grid::{Entity, Grid, Position, Structure, Texture};

const LAYER_COUNT: usize = 3;

/// Characters used for the structure and entity layers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Glyphs {
    /// Open floor
    pub open: char,
    /// Wall
    pub wall: char,
    /// Cell holding a marker
    pub marker: char,
    /// Cell without a marker
    pub vacant: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            open: OPEN_GLYPH,
            wall: WALL_GLYPH,
            marker: MARKER_GLYPH,
            vacant: VACANT_GLYPH,
        }
    }
}

impl Glyphs {
    /// Check that every glyph is printable ASCII and no two glyphs coincide
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the offending glyph
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("open_glyph", self.open),
            ("wall_glyph", self.wall),
            ("marker_glyph", self.marker),
            ("vacant_glyph", self.vacant),
        ];

        for (index, &(parameter, glyph)) in named.iter().enumerate() {
            if !glyph.is_ascii_graphic() {
                return Err(invalid_parameter(
                    parameter,
                    &glyph.escape_default(),
                    &"must be a printable ASCII character",
                ));
            }
            if named
                .iter()
                .skip(index + 1)
                .any(|&(_, other)| other == glyph)
            {
                return Err(invalid_parameter(
                    parameter,
                    &glyph,
                    &"must differ from every other glyph",
                ));
            }
        }
        Ok(())
    }
}

/// Renders grids to the layered text format and reads them back
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayeredSerializer {
    glyphs: Glyphs,
}

impl LayeredSerializer {
    /// Create a serializer with a custom glyph table
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the glyphs are not distinct printable ASCII
    pub fn new(glyphs: Glyphs) -> Result<Self> {
        glyphs.validate()?;
        Ok(Self { glyphs })
    }

    /// Glyph table in use
    pub const fn glyphs(&self) -> &Glyphs {
        &self.glyphs
    }

    /// Render all three layers
    pub fn serialize(&self, grid: &Grid) -> String {
        let spawn = grid.spawn_cell();
        let row_len = grid.width() + 1;
        let mut out = String::with_capacity(LAYER_COUNT * (grid.height() * row_len + 1));

        write_layer(&mut out, grid, |pos| {
            if pos == spawn || grid.is_open(pos) {
                self.glyphs.open
            } else {
                self.glyphs.wall
            }
        });
        write_layer(&mut out, grid, |pos| {
            if pos != spawn && grid.has_marker(pos) {
                self.glyphs.marker
            } else {
                self.glyphs.vacant
            }
        });
        write_layer(&mut out, grid, |pos| {
            grid.texture(pos).unwrap_or_default().glyph()
        });

        out
    }

    /// Rebuild a grid from text produced by `serialize`
    ///
    /// # Errors
    ///
    /// Returns `Parse` for a wrong number of layers, rows of differing
    /// lengths, layers of differing heights, unknown glyphs or a marker on a
    /// wall
    pub fn parse(&self, text: &str) -> Result<Grid> {
        let blocks = split_layers(text);
        if blocks.len() != LAYER_COUNT {
            return Err(parse_error(
                text.lines().count().max(1),
                &format!("expected {LAYER_COUNT} layers, found {}", blocks.len()),
            ));
        }

        let Some(&(first_line, first_row)) = blocks.first().and_then(|rows| rows.first()) else {
            return Err(parse_error(1, &"empty structure layer"));
        };
        let width = first_row.len();
        let height = blocks.first().map_or(0, Vec::len);

        for rows in &blocks {
            if rows.len() != height {
                let line = rows.first().map_or(first_line, |&(line, _)| line);
                return Err(parse_error(
                    line,
                    &format!("layer has {} rows, expected {height}", rows.len()),
                ));
            }
            for &(line, row) in rows {
                if !row.is_ascii() {
                    return Err(parse_error(line, &"row contains non-ASCII characters"));
                }
                if row.len() != width {
                    return Err(parse_error(
                        line,
                        &format!("row has {} cells, expected {width}", row.len()),
                    ));
                }
            }
        }

        let mut grid = Grid::new(width, height)?;
        let (Some(structure), Some(entities), Some(texture)) =
            (blocks.first(), blocks.get(1), blocks.get(2))
        else {
            return Err(parse_error(1, &"missing layer"));
        };

        for (y, &(line, row)) in structure.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let value = if glyph == self.glyphs.open {
                    Structure::Open
                } else if glyph == self.glyphs.wall {
                    Structure::Wall
                } else {
                    return Err(parse_error(line, &format!("unknown structure glyph '{glyph}'")));
                };
                grid.set_structure(Position::new(x as i32, y as i32), value)?;
            }
        }

        for (y, &(line, row)) in entities.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                if glyph == self.glyphs.vacant {
                    continue;
                }
                if glyph != self.glyphs.marker {
                    return Err(parse_error(line, &format!("unknown entity glyph '{glyph}'")));
                }
                if grid.is_wall(pos) {
                    return Err(parse_error(
                        line,
                        &format!("marker at ({x}, {y}) sits on a wall"),
                    ));
                }
                grid.set_entity(pos, Entity::Marker)?;
            }
        }

        for (y, &(line, row)) in texture.iter().enumerate() {
            for (x, byte) in row.bytes().enumerate() {
                let Some(value) = Texture::new(byte) else {
                    return Err(parse_error(
                        line,
                        &format!("texture byte {byte:#04x} is not printable"),
                    ));
                };
                grid.set_texture(Position::new(x as i32, y as i32), value)?;
            }
        }

        Ok(grid)
    }
}

fn write_layer(out: &mut String, grid: &Grid, glyph_at: impl Fn(Position) -> char) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            out.push(glyph_at(Position::new(x, y)));
        }
        out.push('\n');
    }
    out.push('\n');
}

// Groups non-empty lines into blocks separated by blank lines, keeping
// one-based line numbers for error reporting
fn split_layers(text: &str) -> Vec<Vec<(usize, &str)>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push((index + 1, line));
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}
