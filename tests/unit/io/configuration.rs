//! Tests for runtime defaults and naming constants

#[cfg(test)]
mod tests {
    use tilegrid::io::configuration::{
        AUTO_WORKERS, COORDINATE_DELIMITER, DEFAULT_BLOCK_FACTOR, DEFAULT_GUIDANCE_SIZE,
        DEFAULT_TILE_SIZE, GUIDANCE_OUTPUT_DIR, INSTANCE_OUTPUT_DIR, LABEL_OUTPUT_DIR,
        MAX_GRID_DIMENSION, OUTPUT_EXTENSION, PROGRESS_BAR_WIDTH, REAL_OUTPUT_DIR,
        SEQUENTIAL_DIGITS, TILE_EXTENSION,
    };

    // Tests aggregation defaults
    // Verified by changing the default tile size
    #[test]
    fn test_aggregation_defaults() {
        assert_eq!(DEFAULT_BLOCK_FACTOR, 3);
        assert_eq!(DEFAULT_TILE_SIZE, 256);
        assert_eq!(DEFAULT_GUIDANCE_SIZE, 64);
    }

    // Tests guidance is smaller than the output tile
    // Verified by raising the guidance size above the tile size
    #[test]
    fn test_guidance_smaller_than_tile() {
        assert!(DEFAULT_GUIDANCE_SIZE < DEFAULT_TILE_SIZE);
    }

    // Tests output subdirectories are distinct
    // Verified by reusing the label directory for instances
    #[test]
    fn test_output_dirs_distinct() {
        let dirs = [
            REAL_OUTPUT_DIR,
            LABEL_OUTPUT_DIR,
            INSTANCE_OUTPUT_DIR,
            GUIDANCE_OUTPUT_DIR,
        ];
        for (i, a) in dirs.iter().enumerate() {
            for b in dirs.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert_eq!(dirs, ["real", "map", "ins", "guidance"]);
    }

    // Tests naming constants
    // Verified by changing the sequential width
    #[test]
    fn test_naming_constants() {
        assert_eq!(TILE_EXTENSION, "png");
        assert_eq!(OUTPUT_EXTENSION, "png");
        assert_eq!(SEQUENTIAL_DIGITS, 5);
        assert_eq!(COORDINATE_DELIMITER, '_');
    }

    // Tests limits and worker defaults
    // Verified by lowering the grid limit
    #[test]
    fn test_limits() {
        assert_eq!(MAX_GRID_DIMENSION, 65_536);
        assert_eq!(AUTO_WORKERS, 0);
        assert_eq!(PROGRESS_BAR_WIDTH, 40);
    }
}
