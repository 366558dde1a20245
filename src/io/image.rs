//! PNG preview export for generated levels

use std::path::Path;

use image::{ImageBuffer, Rgba};

use crate::io::configuration::{MARKER_COLOR, OPEN_COLOR, SPAWN_COLOR, WALL_COLOR};
use crate::io::error::{LevelError, Result, invalid_parameter};
use crate::spatial::grid::{Grid, Position};

/// Colour of a single cell in the preview
pub fn cell_color(grid: &Grid, pos: Position) -> [u8; 4] {
    if pos == grid.spawn_cell() {
        SPAWN_COLOR
    } else if grid.has_marker(pos) {
        MARKER_COLOR
    } else if grid.is_open(pos) {
        OPEN_COLOR
    } else {
        WALL_COLOR
    }
}

/// Export the grid as a PNG with one `scale x scale` block per cell
///
/// # Errors
///
/// Returns an error if:
/// - `scale` is zero or the image would exceed `u32` dimensions
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_level_as_png(grid: &Grid, scale: u32, output_path: &Path) -> Result<()> {
    if scale == 0 {
        return Err(invalid_parameter("scale", &scale, &"must be at least 1"));
    }
    let (Some(width), Some(height)) = (
        u32::try_from(grid.width())
            .ok()
            .and_then(|w| w.checked_mul(scale)),
        u32::try_from(grid.height())
            .ok()
            .and_then(|h| h.checked_mul(scale)),
    ) else {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &"image dimensions overflow",
        ));
    };

    let img = ImageBuffer::from_fn(width, height, |px, py| {
        let pos = Position::new((px / scale) as i32, (py / scale) as i32);
        Rgba(cell_color(grid, pos))
    });

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| LevelError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| LevelError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
