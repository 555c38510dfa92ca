//! Tests for grid inference strategies and lookups

#[cfg(test)]
mod tests {
    use tilegrid::TileError;
    use tilegrid::spatial::grid::{FallbackOrder, GridBuilder, LayoutStrategy};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    // Tests dimensions come from the maximum coordinates plus one
    // Verified by using the tile count as width
    #[test]
    fn test_coordinate_grid_dimensions() {
        let grid = GridBuilder::new()
            .build(names(&["t_0_0.png", "t_4_1.png", "t_2_6.png"]))
            .expect("grid should build");

        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 7);
        assert!(grid.strategy().is_coordinate_inferred());
        assert_eq!(grid.occupied_count(), 3);
        assert_eq!(grid.hole_count(), 32);
        assert_eq!(grid.tile_at(4, 1), Some("t_4_1.png"));
        assert_eq!(grid.tile_at(1, 1), None);
    }

    // Tests out-of-range lookups are holes rather than panics
    // Verified by indexing the array directly
    #[test]
    fn test_out_of_range_lookup() {
        let grid = GridBuilder::new()
            .build(names(&["t_0_0.png"]))
            .expect("grid should build");

        assert_eq!(grid.tile_at(1, 0), None);
        assert_eq!(grid.tile_at(0, 100), None);
        assert!(grid.contains(0, 0));
        assert!(!grid.contains(1, 0));
    }

    // Tests names without coordinates are excluded when others parse
    // Verified by placing unparsed names sequentially
    #[test]
    fn test_mixed_names_skip_unparsed() {
        let grid = GridBuilder::new()
            .build(names(&["t_1_0.png", "readme.png"]))
            .expect("grid should build");

        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 1);
        assert_eq!(grid.occupied_count(), 1);
        assert_eq!(grid.names().len(), 2);
    }

    // Tests the lexicographically later duplicate wins
    // Verified by iterating parsed names in reverse
    #[test]
    fn test_duplicate_coordinates_last_wins() {
        let grid = GridBuilder::new()
            .build(names(&["b_1_1.png", "a_1_1.png"]))
            .expect("grid should build");

        assert_eq!(grid.tile_at(1, 1), Some("b_1_1.png"));
        assert_eq!(grid.occupied_count(), 1);
    }

    // Tests explicit width fills rows in sorted order
    // Verified by filling columns first
    #[test]
    fn test_explicit_width_row_major() {
        let grid = GridBuilder::new()
            .with_tiles_per_row(Some(2))
            .build(names(&["e.png", "a.png", "c.png", "b.png", "d.png"]))
            .expect("grid should build");

        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(
            grid.strategy(),
            LayoutStrategy::ExplicitWidth { tiles_per_row: 2 }
        );
        assert_eq!(grid.tile_at(0, 0), Some("a.png"));
        assert_eq!(grid.tile_at(1, 0), Some("b.png"));
        assert_eq!(grid.tile_at(0, 2), Some("e.png"));
        assert_eq!(grid.tile_at(1, 2), None);
    }

    // Tests explicit width of zero is rejected
    // Verified by removing the positivity check
    #[test]
    fn test_explicit_width_zero_rejected() {
        let result = GridBuilder::new()
            .with_tiles_per_row(Some(0))
            .build(names(&["a.png"]));

        assert!(matches!(
            result,
            Err(TileError::InvalidParameter {
                parameter: "tiles_per_row",
                ..
            })
        ));
    }

    // Tests coordinates take priority over an explicit width
    // Verified by checking tiles_per_row first
    #[test]
    fn test_coordinates_override_explicit_width() {
        let grid = GridBuilder::new()
            .with_tiles_per_row(Some(1))
            .build(names(&["t_2_0.png"]))
            .expect("grid should build");

        assert_eq!(grid.width(), 3);
        assert!(grid.strategy().is_coordinate_inferred());
    }

    // Tests square fallback pads with the last tile
    // Verified by leaving trailing cells as holes
    #[test]
    fn test_square_fallback_pads_with_last() {
        let grid = GridBuilder::new()
            .build(names(&["a.png", "b.png", "c.png", "d.png", "e.png"]))
            .expect("grid should build");

        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.hole_count(), 0);
        assert_eq!(grid.tile_at(0, 2), Some("e.png"));
        assert_eq!(grid.tile_at(1, 2), Some("e.png"));
    }

    // Tests the minimum fallback width is honoured
    // Verified by ignoring the minimum
    #[test]
    fn test_square_fallback_min_width() {
        let grid = GridBuilder::new()
            .with_min_fallback_width(3)
            .build(names(&["a.png", "b.png", "c.png", "d.png"]))
            .expect("grid should build");

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.tile_at(0, 1), Some("d.png"));
        assert_eq!(grid.tile_at(2, 1), Some("d.png"));
    }

    // Tests column-major order fills columns first
    // Verified by reusing the row-major mapping
    #[test]
    fn test_square_fallback_column_major() {
        let grid = GridBuilder::new()
            .with_order(FallbackOrder::ColumnMajor)
            .build(names(&["a.png", "b.png", "c.png", "d.png"]))
            .expect("grid should build");

        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.tile_at(0, 0), Some("a.png"));
        assert_eq!(grid.tile_at(0, 1), Some("b.png"));
        assert_eq!(grid.tile_at(1, 0), Some("c.png"));
        assert_eq!(
            grid.strategy(),
            LayoutStrategy::SquareApproximated {
                order: FallbackOrder::ColumnMajor
            }
        );
    }

    // Tests an empty listing is an error
    // Verified by returning an empty grid
    #[test]
    fn test_empty_names_rejected() {
        let result = GridBuilder::new().build(Vec::new());
        assert!(matches!(result, Err(TileError::NoTiles { .. })));
    }

    // Tests stray huge coordinates are refused before allocation
    // Verified by removing the dimension check
    #[test]
    fn test_grid_too_large() {
        let result = GridBuilder::new().build(names(&["t_0_0.png", "t_70000_0.png"]));
        assert!(matches!(
            result,
            Err(TileError::GridTooLarge { width: 70_001, .. })
        ));
    }

    // Tests occupied cells iterate row-major
    // Verified by iterating column-major
    #[test]
    fn test_occupied_row_major() {
        let grid = GridBuilder::new()
            .build(names(&["t_1_0.png", "t_0_1.png"]))
            .expect("grid should build");

        let order: Vec<&str> = grid.occupied().map(|(_, name)| name).collect();
        assert_eq!(order, vec!["t_1_0.png", "t_0_1.png"]);
        assert_eq!(
            grid.first_occupied().map(|(coord, _)| (coord.x, coord.y)),
            Some((1, 0))
        );
        assert_eq!(grid.first_placed_name(), Some("t_0_1.png"));
    }

    // Tests block enumeration covers partial blocks in row-major order
    // Verified by using floor division for block counts
    #[test]
    fn test_blocks_cover_partial_edges() {
        let grid = GridBuilder::new()
            .build(names(&["t_0_0.png", "t_6_3.png"]))
            .expect("grid should build");

        assert_eq!(grid.block_count(3), 6);
        let origins: Vec<(usize, usize)> = grid
            .blocks(3)
            .map(|block| (block.origin().x, block.origin().y))
            .collect();
        assert_eq!(
            origins,
            vec![(0, 0), (3, 0), (6, 0), (0, 3), (3, 3), (6, 3)]
        );
        let ordinals: Vec<usize> = grid.blocks(3).map(|block| block.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3, 4, 5]);
    }

    // Tests zero factor yields no blocks
    // Verified by dividing without the zero guard
    #[test]
    fn test_blocks_zero_factor() {
        let grid = GridBuilder::new()
            .build(names(&["t_0_0.png"]))
            .expect("grid should build");

        assert_eq!(grid.blocks(0).count(), 0);
        assert_eq!(grid.block_count(0), 0);
    }
}
