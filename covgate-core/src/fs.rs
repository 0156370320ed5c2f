//! Filesystem abstractions used to read report files from a build workspace.

use std::path::Path;

use crate::error::Result;

/// Abstraction over filesystem access for testability.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    /// Check whether a file exists at the given path.
    fn exists(&self, path: &Path) -> bool;
    /// Read a file into a string.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Default filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone)]
pub struct StdFileSystem;

impl StdFileSystem {
    /// Create a new standard filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::StdFileSystem;
    use crate::fs::FileSystem;
    use std::path::PathBuf;

    #[test]
    fn std_filesystem_probes_and_reads_files() {
        let root = std::env::temp_dir().join(unique_dir_name());
        std::fs::create_dir_all(&root).expect("create temp dir");
        let file_path = root.join("coverage.json");
        std::fs::write(&file_path, "{}").expect("write test file");

        let fs = StdFileSystem::new();
        assert!(fs.exists(&file_path));
        assert!(!fs.exists(&root.join("missing.json")));

        let contents = fs.read_to_string(&file_path).expect("read file");
        assert_eq!(contents, "{}");

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[test]
    fn std_filesystem_errors_on_missing_file() {
        let missing = std::env::temp_dir().join(unique_dir_name()).join("no.json");
        let fs = StdFileSystem::new();
        assert!(fs.read_to_string(&missing).is_err());
    }

    fn unique_dir_name() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time")
            .as_nanos();
        PathBuf::from(format!("covgate_core_test_{nanos}"))
    }
}
