//! Scratch directories for tests that write files.

/// Creates a temporary directory removed when the handle drops.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("gdd_test_")
        .tempdir()
        .expect("Failed to create temporary test directory")
}
