//! Tests for the layered grid and its bounds-checked accessors

#[cfg(test)]
mod tests {

    use levelforge::LevelError;
    use levelforge::spatial::grid::{Entity, Grid, Position, Structure, Texture};
    use ndarray::Array2;

    // Tests that a fresh grid is solid wall with neutral texture and no markers
    // Verified by initializing the structure layer with Open
    #[test]
    fn test_new_grid_is_all_wall() {
        let Ok(grid) = Grid::new(6, 4) else {
            panic!("6x4 grid should be valid");
        };

        assert_eq!(grid.width(), 6);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.count_structure(Structure::Wall), 24);
        assert_eq!(grid.marker_count(), 0);
        assert!(
            grid.positions()
                .all(|pos| grid.texture(pos).is_ok_and(|t| t == Texture::NEUTRAL))
        );
    }

    // Tests that zero dimensions are rejected
    // Verified by removing the zero check in validate_dimension
    #[test]
    fn test_zero_dimension_is_invalid() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(LevelError::InvalidParameter {
                parameter: "width",
                ..
            })
        ));
        assert!(matches!(
            Grid::new(5, 0),
            Err(LevelError::InvalidParameter {
                parameter: "height",
                ..
            })
        ));
    }

    // Tests that off-grid access reports the requested coordinate and grid size
    // Verified by returning a default cell for out-of-range positions
    #[test]
    fn test_out_of_bounds_access_is_reported() {
        let Ok(mut grid) = Grid::new(3, 3) else {
            panic!("3x3 grid should be valid");
        };

        assert!(matches!(
            grid.structure(Position::new(3, 0)),
            Err(LevelError::OutOfBounds {
                x: 3,
                y: 0,
                width: 3,
                height: 3
            })
        ));
        assert!(matches!(
            grid.set_structure(Position::new(-1, 1), Structure::Open),
            Err(LevelError::OutOfBounds { x: -1, y: 1, .. })
        ));
        assert!(grid.get(Position::new(1, 5)).is_err());
    }

    // Tests that off-grid neighbours read as walls without errors
    // Verified by making is_open return true for positions outside the grid
    #[test]
    fn test_off_grid_cells_read_as_wall() {
        let Ok(grid) = Grid::filled(3, 3, Structure::Open) else {
            panic!("3x3 grid should be valid");
        };

        assert!(grid.is_wall(Position::new(-1, 0)));
        assert!(grid.is_wall(Position::new(0, 3)));
        assert!(grid.is_open(Position::new(1, 1)));
        assert!(!grid.has_marker(Position::new(9, 9)));
    }

    // Tests border detection on every edge and the interior
    // Verified by omitting the width - 1 comparison in is_border
    #[test]
    fn test_border_detection() {
        let Ok(grid) = Grid::new(5, 4) else {
            panic!("5x4 grid should be valid");
        };

        assert!(grid.is_border(Position::new(0, 2)));
        assert!(grid.is_border(Position::new(4, 2)));
        assert!(grid.is_border(Position::new(2, 0)));
        assert!(grid.is_border(Position::new(2, 3)));
        assert!(!grid.is_border(Position::new(2, 2)));
        assert!(!grid.is_border(Position::new(5, 2)));
    }

    // Tests that the spawn cell is the integer center of the grid
    // Verified by rounding the center up instead of down
    #[test]
    fn test_spawn_cell_is_grid_center() {
        let Ok(odd) = Grid::new(127, 127) else {
            panic!("127x127 grid should be valid");
        };
        let Ok(even) = Grid::new(8, 6) else {
            panic!("8x6 grid should be valid");
        };

        assert_eq!(odd.spawn_cell(), Position::new(63, 63));
        assert_eq!(even.spawn_cell(), Position::new(4, 3));
    }

    // Tests that markers may only sit on open cells
    // Verified by removing the structure check in set_entity
    #[test]
    fn test_marker_on_wall_is_rejected() {
        let Ok(mut grid) = Grid::new(4, 4) else {
            panic!("4x4 grid should be valid");
        };
        let pos = Position::new(1, 1);

        assert!(matches!(
            grid.set_entity(pos, Entity::Marker),
            Err(LevelError::InvalidParameter { .. })
        ));

        assert!(grid.set_structure(pos, Structure::Open).is_ok());
        assert!(grid.set_entity(pos, Entity::Marker).is_ok());
        assert_eq!(grid.entity(pos).ok(), Some(Entity::Marker));
    }

    // Tests that walling a cell removes its marker
    // Verified by skipping the entity reset in set_structure
    #[test]
    fn test_walling_cell_clears_marker() {
        let Ok(mut grid) = Grid::filled(4, 4, Structure::Open) else {
            panic!("4x4 grid should be valid");
        };
        let pos = Position::new(2, 1);
        assert!(grid.set_entity(pos, Entity::Marker).is_ok());

        assert!(grid.set_structure(pos, Structure::Wall).is_ok());

        assert!(!grid.has_marker(pos));
        assert_eq!(grid.marker_count(), 0);
    }

    // Tests that marker listing follows row-major order
    // Verified by listing markers column-major
    #[test]
    fn test_markers_listed_row_major() {
        let Ok(mut grid) = Grid::filled(4, 4, Structure::Open) else {
            panic!("4x4 grid should be valid");
        };
        for pos in [Position::new(1, 3), Position::new(3, 0), Position::new(0, 2)] {
            assert!(grid.set_entity(pos, Entity::Marker).is_ok());
        }

        assert_eq!(
            grid.markers(),
            vec![Position::new(3, 0), Position::new(0, 2), Position::new(1, 3)]
        );
    }

    // Tests that the texture layer is independent of structure and entities
    // Verified by resetting texture in set_structure
    #[test]
    fn test_texture_is_independent_layer() {
        let Ok(mut grid) = Grid::new(3, 3) else {
            panic!("3x3 grid should be valid");
        };
        let pos = Position::new(1, 1);
        let Some(moss) = Texture::new(b'm') else {
            panic!("'m' is printable");
        };

        assert!(grid.set_texture(pos, moss).is_ok());
        assert!(grid.set_structure(pos, Structure::Open).is_ok());
        assert!(grid.set_structure(pos, Structure::Wall).is_ok());

        assert_eq!(grid.texture(pos).ok(), Some(moss));
        assert_eq!(Texture::new(b' '), None);
        assert_eq!(Texture::new(b'\n'), None);
    }

    // Tests that a replacement layer must match the grid shape and drops stranded markers
    // Verified by skipping the shape comparison in replace_structure_layer
    #[test]
    fn test_replace_structure_layer() {
        let Ok(mut grid) = Grid::filled(3, 2, Structure::Open) else {
            panic!("3x2 grid should be valid");
        };
        let pos = Position::new(2, 1);
        assert!(grid.set_entity(pos, Entity::Marker).is_ok());

        let wrong_shape = Array2::from_elem((3, 2), Structure::Wall);
        assert!(grid.replace_structure_layer(wrong_shape).is_err());
        assert!(grid.has_marker(pos));

        let walls = Array2::from_elem((2, 3), Structure::Wall);
        assert!(grid.replace_structure_layer(walls).is_ok());
        assert_eq!(grid.count_structure(Structure::Open), 0);
        assert_eq!(grid.marker_count(), 0);
    }

    // Tests that flat indices are row-major and absent off the grid
    // Verified by swapping x and y in flat_index
    #[test]
    fn test_flat_index_is_row_major() {
        let Ok(grid) = Grid::new(5, 3) else {
            panic!("5x3 grid should be valid");
        };

        assert_eq!(grid.flat_index(Position::new(0, 0)), Some(0));
        assert_eq!(grid.flat_index(Position::new(4, 0)), Some(4));
        assert_eq!(grid.flat_index(Position::new(1, 2)), Some(11));
        assert_eq!(grid.flat_index(Position::new(5, 0)), None);
    }
}
