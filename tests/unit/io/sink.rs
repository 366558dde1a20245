//! Tests for level sinks

#[cfg(test)]
mod tests {
    use levelforge::LevelError;
    use levelforge::io::sink::{FileSink, LevelSink};
    use std::fs;

    // Tests that files are written with parent directories created
    // Verified by skipping create_dir_all
    #[test]
    fn test_file_sink_creates_directories() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("temporary directory should be available");
        };
        let path = dir.path().join("levels").join("nested").join("Map.dat.txt");
        let mut sink = FileSink::new();

        assert!(sink.accept(&path, "AAA\n\n").is_ok());

        assert_eq!(fs::read_to_string(&path).ok().as_deref(), Some("AAA\n\n"));
        assert_eq!(sink.written(), [path.clone()].as_slice());
    }

    // Tests that an unwritable destination yields a FileSystem error
    // Verified by ignoring the write result
    #[test]
    fn test_file_sink_reports_write_failure() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("temporary directory should be available");
        };
        let mut sink = FileSink::default();

        let result = sink.accept(dir.path(), "text");

        assert!(matches!(
            result,
            Err(LevelError::FileSystem {
                operation: "write level",
                ..
            })
        ));
        assert!(sink.written().is_empty());
    }
}
