//! Tests for circular clearings

#[cfg(test)]
mod tests {

    use levelforge::algorithm::clearing::{carve_clearing, carve_clearings};
    use levelforge::spatial::grid::{Grid, Position, Structure};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // Tests the filled circle shape for a small radius
    // Verified by using a square instead of the distance check
    #[test]
    fn test_clearing_is_filled_circle() {
        let Ok(mut grid) = Grid::new(11, 11) else {
            panic!("11x11 grid should be valid");
        };

        let opened = carve_clearing(&mut grid, Position::new(5, 5), 2);

        assert_eq!(opened.ok(), Some(13));
        assert!(grid.is_open(Position::new(5, 3)));
        assert!(grid.is_open(Position::new(6, 6)));
        assert!(grid.is_wall(Position::new(7, 7)));
    }

    // Tests that only walls are counted when a clearing overlaps open floor
    // Verified by counting every cell in the circle
    #[test]
    fn test_clearing_counts_only_new_floor() {
        let Ok(mut grid) = Grid::new(11, 11) else {
            panic!("11x11 grid should be valid");
        };
        assert!(grid.set_structure(Position::new(5, 5), Structure::Open).is_ok());

        assert_eq!(carve_clearing(&mut grid, Position::new(5, 5), 1).ok(), Some(4));
    }

    // Tests that clearings near the edge leave the border intact
    // Verified by dropping the is_border check
    #[test]
    fn test_clearing_keeps_border() {
        let Ok(mut grid) = Grid::new(8, 8) else {
            panic!("8x8 grid should be valid");
        };

        assert!(carve_clearing(&mut grid, Position::new(1, 1), 3).is_ok());

        assert!(grid.is_open(Position::new(1, 1)));
        assert!(grid.is_wall(Position::new(0, 1)));
        assert!(grid.is_wall(Position::new(1, 0)));
    }

    // Tests random clearings on a seeded stream
    // Verified by drawing centers on the border
    #[test]
    fn test_random_clearings_open_interior_only() {
        let Ok(mut grid) = Grid::new(60, 60) else {
            panic!("60x60 grid should be valid");
        };
        let mut rng = StdRng::seed_from_u64(5);

        let Ok(opened) = carve_clearings(&mut grid, 3, &mut rng) else {
            panic!("clearings should carve");
        };

        assert!(opened > 0);
        assert_eq!(opened, grid.count_structure(Structure::Open));
        assert!(
            grid.positions()
                .filter(|&pos| grid.is_border(pos))
                .all(|pos| grid.is_wall(pos))
        );
    }

    // Tests that grids without an interior are left alone
    // Verified by removing the size guard before drawing centers
    #[test]
    fn test_tiny_grid_is_unchanged() {
        let Ok(mut grid) = Grid::new(2, 5) else {
            panic!("2x5 grid should be valid");
        };
        let mut rng = StdRng::seed_from_u64(5);

        assert_eq!(carve_clearings(&mut grid, 4, &mut rng).ok(), Some(0));
        assert_eq!(grid.count_structure(Structure::Open), 0);
    }
}
