//! Tests for tile listing and cross-directory intersection

#[cfg(test)]
mod tests {
    use std::path::Path;
    use tilegrid::TileError;
    use tilegrid::io::listing::{common_tiles, is_tile_name, list_tiles};

    fn touch(dir: &Path, name: &str) {
        std::fs::create_dir_all(dir).expect("create dir");
        std::fs::write(dir.join(name), b"").expect("write file");
    }

    // Tests extension matching ignores case
    // Verified by comparing case-sensitively
    #[test]
    fn test_is_tile_name() {
        assert!(is_tile_name("a_0_0.png"));
        assert!(is_tile_name("a_0_0.PNG"));
        assert!(!is_tile_name("a_0_0.jpg"));
        assert!(!is_tile_name("png"));
    }

    // Tests listings are sorted and skip other files and subdirectories
    // Verified by including subdirectories named like tiles
    #[test]
    fn test_list_tiles_filters() {
        let dir = tempfile::tempdir().expect("temp dir");
        touch(dir.path(), "b.png");
        touch(dir.path(), "a.PNG");
        touch(dir.path(), "notes.txt");
        std::fs::create_dir(dir.path().join("sub.png")).expect("create subdir");

        let names: Vec<String> = list_tiles(dir.path()).expect("list").into_iter().collect();
        assert_eq!(names, vec!["a.PNG".to_string(), "b.png".to_string()]);
    }

    // Tests a missing directory is reported as such
    // Verified by returning an empty listing
    #[test]
    fn test_list_missing_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(matches!(
            list_tiles(&dir.path().join("absent")),
            Err(TileError::MissingDirectory { .. })
        ));
    }

    // Tests only names present in every directory survive
    // Verified by taking the union
    #[test]
    fn test_common_tiles_intersection() {
        let dir = tempfile::tempdir().expect("temp dir");
        let map = dir.path().join("map");
        let ins = dir.path().join("ins");
        touch(&map, "t_0_0.png");
        touch(&map, "t_1_0.png");
        touch(&ins, "t_1_0.png");
        touch(&ins, "t_2_0.png");

        let common = common_tiles(&[map, ins]).expect("common");
        assert_eq!(common, vec!["t_1_0.png".to_string()]);
    }

    // Tests an empty intersection is an error naming the directories
    // Verified by returning an empty vector
    #[test]
    fn test_common_tiles_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let map = dir.path().join("map");
        let ins = dir.path().join("ins");
        touch(&map, "a.png");
        touch(&ins, "b.png");

        match common_tiles(&[map, ins]) {
            Err(TileError::NoTiles { directories }) => assert_eq!(directories.len(), 2),
            other => unreachable!("expected NoTiles, got {other:?}"),
        }
        assert!(matches!(common_tiles(&[]), Err(TileError::NoTiles { .. })));
    }
}
